use std::sync::Arc;

use crate::domain::{Permission, UserId};
use crate::error::RepoError;
use crate::ports::PermissionRepository;

/// Looks up the permissions granted to a user.
#[derive(Clone)]
pub struct PermissionUseCase {
    permissions: Arc<dyn PermissionRepository>,
}

impl PermissionUseCase {
    pub fn new(permissions: Arc<dyn PermissionRepository>) -> Self {
        Self { permissions }
    }

    /// Storage errors are returned unchanged.
    pub async fn get_permissions(&self, user_id: UserId) -> Result<Vec<Permission>, RepoError> {
        self.permissions.find_by_user_id(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::fakes::FakePermissions;

    #[tokio::test]
    async fn test_returns_only_owned_permissions() {
        let repo = FakePermissions::with(&[(1, "projects:write"), (2, "admin"), (1, "comments:delete")]);
        let usecase = PermissionUseCase::new(Arc::new(repo));

        let mut names: Vec<String> = usecase
            .get_permissions(1)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["comments:delete", "projects:write"]);
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let usecase = PermissionUseCase::new(Arc::new(FakePermissions::failing()));

        let err = usecase.get_permissions(1).await.unwrap_err();
        assert!(matches!(err, RepoError::Connection(_)));
    }
}
