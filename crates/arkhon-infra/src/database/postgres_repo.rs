//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter};

use arkhon_core::domain::{NewUser, Permission, User, UserId};
use arkhon_core::error::RepoError;
use arkhon_core::ports::{PermissionRepository, UserRepository};

use super::entity::permission::{self, Entity as PermissionEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL permission repository.
pub type PostgresPermissionRepository = PostgresBaseRepository<PermissionEntity>;

/// Mask an email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        tracing::debug!(username = %new_user.username, "Inserting user");

        let active_model = user::ActiveModel::try_from(new_user)?;
        let model = active_model
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        User::try_from(model)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, RepoError> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }
        tracing::debug!(
            username = username.unwrap_or("-"),
            user_email = %email.map(mask_email).unwrap_or_else(|| "-".to_string()),
            "Finding user by username or email"
        );

        let identifier = Condition::any()
            .add_option(username.map(|u| user::Column::Username.eq(u)))
            .add_option(email.map(|e| user::Column::Email.eq(e)));

        let result = UserEntity::find()
            .filter(identifier)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        result.map(User::try_from).transpose()
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), RepoError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let result = UserEntity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(now))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::info!(user_id = id, "User soft-deleted");
        Ok(())
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Permission>, RepoError> {
        let result = PermissionEntity::find()
            .filter(permission::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
