//! Application state - shared across all handlers.

use std::sync::Arc;

use arkhon_core::ports::{PermissionRepository, UserRepository};
use arkhon_core::usecase::{PermissionUseCase, UserUseCase};
use arkhon_infra::{
    Argon2PasswordService, InMemoryPermissionRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use arkhon_infra::database::{
    DatabaseConnections, PostgresPermissionRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub users: UserUseCase,
    pub permissions: PermissionUseCase,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, permissions) = Self::repositories(config).await;

        tracing::info!("Application state initialized");
        Self::from_parts(users, permissions, config.jwt.clone())
    }

    /// Wire use-cases over the given repositories.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        permissions: Arc<dyn PermissionRepository>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            users: UserUseCase::new(
                users,
                Arc::new(Argon2PasswordService::new()),
                Arc::new(JwtTokenService::new(jwt)),
            ),
            permissions: PermissionUseCase::new(permissions),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PermissionRepository>) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => (
                Arc::new(PostgresUserRepository::new(Arc::clone(&connections.main))),
                Arc::new(PostgresPermissionRepository::new(connections.main)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PermissionRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }

    fn in_memory() -> (Arc<dyn UserRepository>, Arc<dyn PermissionRepository>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPermissionRepository::new()),
        )
    }
}
