// Centralized configuration management for the registry backend
// Every env var is read ONCE in main and the result is passed down through AppState

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Minimum accepted length for the token signing secret
pub const MIN_SECRET_LENGTH: usize = 32;

/// Work factor bounds accepted by bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store_backend: StoreBackend,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub security: SecurityConfig,
    pub disable_embedded_migrations: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub environment: Environment,
    pub rust_log: String,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which credential store implementation backs the service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::InvalidValue(
                "STORE_BACKEND".to_string(),
                format!("unknown backend '{}' (expected postgres or memory)", other),
            )),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
    pub idle_timeout: u64,
    pub max_lifetime: u64,
}

/// Session token signing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
    pub cookie_domain: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Helper function to get required env var
        let get_required = |key: &str| -> Result<String, ConfigError> {
            env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
        };

        // Helper function to get optional env var with default
        let get_or_default = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:3000");

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));
        let rust_log = get_or_default("RUST_LOG", "info");

        // The service must not start without a usable signing secret
        let secret = get_required("JWT_SECRET")?;
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                format!(
                    "Secret must be at least {} characters long",
                    MIN_SECRET_LENGTH
                ),
            ));
        }

        let store_backend: StoreBackend = get_or_default("STORE_BACKEND", "postgres").parse()?;
        let database_url = match store_backend {
            StoreBackend::Postgres => get_required("DATABASE_URL")?,
            StoreBackend::Memory => get_or_default("DATABASE_URL", ""),
        };

        let database = DatabaseConfig {
            url: database_url,
            max_connections: parse_or_default("DATABASE_MAX_CONNECTIONS", "20")?,
            min_connections: parse_or_default("DATABASE_MIN_CONNECTIONS", "2")?,
            connect_timeout: parse_u64_or_default("DATABASE_CONNECT_TIMEOUT", "30")?,
            idle_timeout: parse_u64_or_default("DATABASE_IDLE_TIMEOUT", "600")?,
            max_lifetime: parse_u64_or_default("DATABASE_MAX_LIFETIME", "1800")?,
        };

        let bcrypt_cost = parse_or_default("BCRYPT_COST", "10")?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST".to_string(),
                format!(
                    "cost must be between {} and {}",
                    MIN_BCRYPT_COST, MAX_BCRYPT_COST
                ),
            ));
        }

        let cors_allowed_origins: Vec<String> =
            get_or_default("CORS_ALLOWED_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

        let security = SecurityConfig {
            bcrypt_cost,
            cors_allowed_origins,
            cookie_domain: get_or_default("COOKIE_DOMAIN", "localhost"),
        };

        Ok(Self {
            server: ServerConfig {
                bind_address,
                environment,
                rust_log,
            },
            store_backend,
            database,
            jwt: JwtConfig { secret },
            security,
            disable_embedded_migrations: parse_bool_or_default(
                "DISABLE_EMBEDDED_MIGRATIONS",
                "false",
            ),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "JWT_SECRET",
        "STORE_BACKEND",
        "DATABASE_URL",
        "BCRYPT_COST",
        "CORS_ALLOWED_ORIGINS",
        "ENVIRONMENT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from("development".to_string()),
            Environment::Development
        );
        assert_eq!(
            Environment::from("prod".to_string()),
            Environment::Production
        );
        assert_eq!(Environment::from("test".to_string()), Environment::Test);
        assert_eq!(
            Environment::from("unknown".to_string()),
            Environment::Development
        );
    }

    #[test]
    #[serial]
    fn test_missing_secret_fails_fast() {
        clear_env();
        env::set_var("STORE_BACKEND", "memory");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingVar(var)) if var == "JWT_SECRET"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_short_secret_rejected() {
        clear_env();
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("JWT_SECRET", "too-short");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue(var, _)) if var == "JWT_SECRET"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_postgres_backend_requires_database_url() {
        clear_env();
        env::set_var(
            "JWT_SECRET",
            "test-secret-that-is-at-least-32-characters-long",
        );

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingVar(var)) if var == "DATABASE_URL"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_with_env() {
        clear_env();
        env::set_var(
            "JWT_SECRET",
            "test-secret-that-is-at-least-32-characters-long",
        );
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("BCRYPT_COST", "4");
        env::set_var(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:5173, https://app.example.com",
        );
        env::set_var("ENVIRONMENT", "production");

        let config = AppConfig::from_env().expect("Failed to load test config");

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.security.bcrypt_cost, 4);
        assert_eq!(
            config.security.cors_allowed_origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string()
            ]
        );
        assert!(config.is_production());
        assert!(!format!("{:?}", config.jwt).contains("test-secret"));

        let serialized = serde_json::to_string(&config).expect("config should serialize");
        assert!(!serialized.contains("test-secret"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bcrypt_cost_out_of_range() {
        clear_env();
        env::set_var(
            "JWT_SECRET",
            "test-secret-that-is-at-least-32-characters-long",
        );
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("BCRYPT_COST", "2");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue(var, _)) if var == "BCRYPT_COST"));

        clear_env();
    }
}
