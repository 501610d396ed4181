//! Application configuration loaded from environment variables.
//!
//! Built once in `main` and handed by reference to whatever needs it; nothing
//! reads the environment after startup.

use std::env;
use std::str::FromStr;

use arkhon_infra::JwtConfig;
use arkhon_infra::database::DatabaseConfig;

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_JWT_SECRET {
            let is_production = lookup("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            database,
            jwt: JwtConfig::new(secret),
        }
    }
}

/// Look up `key` and parse it, treating unparseable values as unset.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.secret, DEFAULT_JWT_SECRET);
    }

    #[test]
    fn test_database_and_secret() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/arkhon"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "not-a-port"),
        ]);

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/arkhon");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.port, 8080);
    }
}
