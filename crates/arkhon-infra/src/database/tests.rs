use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use arkhon_core::domain::{NewUser, PrivacySettings, Visibility};
use arkhon_core::error::RepoError;
use arkhon_core::ports::{PermissionRepository, UserRepository};

use crate::database::DatabaseConnections;
use crate::database::entity::{permission, user};
use crate::database::postgres_repo::{
    PostgresPermissionRepository, PostgresUserRepository, mask_email,
};

fn user_model(id: i64) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        first_name: "Ann".to_owned(),
        last_name: "Lee".to_owned(),
        bio: String::new(),
        verified: false,
        username: "annlee1".to_owned(),
        email: "ann@example.com".to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        xp: 500,
        arkhoin: 1000,
        notification: serde_json::json!({ "in_app": true, "email": false }),
        privacy: serde_json::json!({ "inventory": "private" }),
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

#[tokio::test]
async fn test_create_user_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(17)]])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    let user = repo
        .create(NewUser::new(
            "Ann".into(),
            "Lee".into(),
            "annlee1".into(),
            "ann@example.com".into(),
            "$argon2id$stub".into(),
        ))
        .await
        .unwrap();

    assert_eq!(user.id, 17);
    assert_eq!(user.username, "annlee1");
}

#[tokio::test]
async fn test_find_user_decodes_preferences() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(1)]])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_id(1).await.unwrap().unwrap();

    assert_eq!(
        user.privacy,
        PrivacySettings {
            inventory: Visibility::Private,
            ..PrivacySettings::default()
        }
    );
    assert!(user.notification.in_app);
}

#[tokio::test]
async fn test_find_by_username_or_email_miss() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    let result = repo
        .find_by_username_or_email(Some("ghost"), None)
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_corrupt_preference_document_is_error() {
    let mut model = user_model(1);
    model.privacy = serde_json::json!({ "wallet": "private" });
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    let result = repo.find_by_id(1).await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}

#[tokio::test]
async fn test_soft_delete_missing_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    assert!(matches!(repo.soft_delete(5).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_soft_delete_marks_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let repo = PostgresUserRepository::new(db);

    assert!(repo.soft_delete(5).await.is_ok());
}

#[tokio::test]
async fn test_find_permissions_by_user() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            permission::Model {
                id: 1,
                user_id: 4,
                name: "projects:write".to_owned(),
                created_at: now.into(),
            },
            permission::Model {
                id: 2,
                user_id: 4,
                name: "comments:delete".to_owned(),
                created_at: now.into(),
            },
        ]])
        .into_connection();
    let repo = PostgresPermissionRepository::new(db);

    let permissions = repo.find_by_user_id(4).await.unwrap();

    assert_eq!(permissions.len(), 2);
    assert!(permissions.iter().all(|p| p.user_id == 4));
}

#[test]
fn test_mask_email() {
    assert_eq!(mask_email("ann@example.com"), "a***@example.com");
    assert_eq!(mask_email("a@example.com"), "***@example.com");
    assert_eq!(mask_email("not-an-email"), "***");
}

#[tokio::test]
async fn test_repositories_share_one_pool() {
    let connections = DatabaseConnections {
        main: Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![user_model(5)]])
                .append_query_results(vec![vec![permission::Model {
                    id: 1,
                    user_id: 5,
                    name: "projects:write".to_owned(),
                    created_at: Utc::now().into(),
                }]])
                .into_connection(),
        ),
    };
    let users = PostgresUserRepository::new(Arc::clone(&connections.main));
    let permissions = PostgresPermissionRepository::new(connections.main);

    let user = users.find_by_id(5).await.unwrap().unwrap();
    let granted = permissions.find_by_user_id(user.id).await.unwrap();

    assert_eq!(granted.len(), 1);
    assert_eq!(granted[0].name, "projects:write");
}
