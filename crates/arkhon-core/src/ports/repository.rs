use async_trait::async_trait;

use crate::domain::{NewUser, Permission, User, UserId};
use crate::error::RepoError;

/// User storage. Soft-deleted users are invisible to every lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `RepoError::Constraint` when the
    /// username or email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a live user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Find a live user matching the given username OR the given email.
    /// Absent identifiers are not matched against.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, RepoError>;

    /// Mark a user as deleted without removing the row.
    async fn soft_delete(&self, id: UserId) -> Result<(), RepoError>;
}

/// Permission storage.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Permission>, RepoError>;
}
