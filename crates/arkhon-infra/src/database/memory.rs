//! In-memory repositories - used as fallback when no database is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use arkhon_core::domain::{NewUser, Permission, User, UserId};
use arkhon_core::error::RepoError;
use arkhon_core::ports::{PermissionRepository, UserRepository};

#[derive(Default)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    last_id: UserId,
}

/// In-memory user store.
///
/// Username and email uniqueness covers soft-deleted rows too, matching the
/// unique indexes of the relational schema. The check and the insert happen
/// under one write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;

        if let Some(taken) = table
            .rows
            .values()
            .find(|u| u.username == user.username || u.email == user.email)
        {
            let index = if taken.username == user.username {
                "users_username_key"
            } else {
                "users_email_key"
            };
            return Err(RepoError::Constraint(index.to_string()));
        }

        table.last_id += 1;
        let user = user.into_user(table.last_id);
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|u| !u.is_deleted())
            .find(|u| username == Some(u.username.as_str()) || email == Some(u.email.as_str()))
            .cloned())
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        let user = table
            .rows
            .get_mut(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        user.deleted_at = Some(now);
        user.updated_at = now;
        Ok(())
    }
}

/// In-memory permission store.
#[derive(Default)]
pub struct InMemoryPermissionRepository {
    grants: RwLock<Vec<Permission>>,
}

impl InMemoryPermissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a named permission to a user.
    pub async fn grant(&self, user_id: UserId, name: impl Into<String>) -> Permission {
        let mut grants = self.grants.write().await;
        let permission = Permission {
            id: grants.len() as i64 + 1,
            user_id,
            name: name.into(),
            created_at: Utc::now(),
        };
        grants.push(permission.clone());
        permission
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Permission>, RepoError> {
        let grants = self.grants.read().await;
        Ok(grants
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}
