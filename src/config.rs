use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub timeout: Duration,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("users.db"),
            timeout: Duration::from_secs(30),
            max_connections: 5,
        }
    }
}

/// Security parameters. Declared but not enforced: digests are always
/// SHA-256 and there is no lockout.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub hash_algorithm: String,
    pub salt_length: usize,
    pub min_password_length: usize,
    pub max_login_attempts: u32,
    pub lockout_duration: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: "sha256".into(),
            salt_length: 32,
            min_password_length: 6,
            max_login_attempts: 5,
            lockout_duration: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    pub name_min_length: usize,
    pub name_max_length: usize,
    pub email_max_length: usize,
    pub password_min_length: usize,
    pub password_max_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_length: 2,
            name_max_length: 100,
            email_max_length: 255,
            password_min_length: 6,
            password_max_length: 128,
        }
    }
}

/// Human readable outcome strings handed back to callers.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    pub user_registered: String,
    pub user_updated: String,
    pub user_deleted: String,
    pub email_taken: String,
    pub user_not_found: String,
    pub invalid_credentials: String,
    pub no_fields: String,
    pub login_success: String,
    pub account_locked: String,
    pub internal_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            user_registered: "user registered successfully".into(),
            user_updated: "user updated successfully".into(),
            user_deleted: "user deleted successfully".into(),
            email_taken: "email already registered".into(),
            user_not_found: "user not found".into(),
            invalid_credentials: "email or password incorrect".into(),
            no_fields: "no fields to update".into(),
            login_success: "login successful".into(),
            account_locked: "account temporarily locked after repeated failed logins".into(),
            internal_error: "internal server error".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub debug: bool,
    pub timezone: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "account-store".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            debug: false,
            timezone: "UTC".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub validation: ValidationConfig,
    pub messages: Messages,
    pub app: AppInfo,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let database = DatabaseConfig {
            path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database.path),
            timeout: Duration::from_secs(env_or(
                "DATABASE_TIMEOUT_SECS",
                defaults.database.timeout.as_secs(),
            )),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.database.max_connections),
        };
        anyhow::ensure!(database.max_connections > 0, "DATABASE_MAX_CONNECTIONS must be positive");

        let security = SecurityConfig {
            hash_algorithm: std::env::var("SECURITY_HASH_ALGORITHM")
                .unwrap_or(defaults.security.hash_algorithm),
            salt_length: env_or("SECURITY_SALT_LENGTH", defaults.security.salt_length),
            min_password_length: env_or(
                "SECURITY_MIN_PASSWORD_LENGTH",
                defaults.security.min_password_length,
            ),
            max_login_attempts: env_or(
                "SECURITY_MAX_LOGIN_ATTEMPTS",
                defaults.security.max_login_attempts,
            ),
            lockout_duration: Duration::from_secs(env_or(
                "SECURITY_LOCKOUT_DURATION_SECS",
                defaults.security.lockout_duration.as_secs(),
            )),
        };

        let v = defaults.validation;
        let validation = ValidationConfig {
            name_min_length: env_or("VALIDATION_NAME_MIN_LENGTH", v.name_min_length),
            name_max_length: env_or("VALIDATION_NAME_MAX_LENGTH", v.name_max_length),
            email_max_length: env_or("VALIDATION_EMAIL_MAX_LENGTH", v.email_max_length),
            password_min_length: env_or("VALIDATION_PASSWORD_MIN_LENGTH", v.password_min_length),
            password_max_length: env_or("VALIDATION_PASSWORD_MAX_LENGTH", v.password_max_length),
        };
        anyhow::ensure!(
            validation.name_min_length <= validation.name_max_length
                && validation.password_min_length <= validation.password_max_length,
            "validation minimums must not exceed maximums"
        );

        let app = AppInfo {
            name: std::env::var("APP_NAME").unwrap_or(defaults.app.name),
            version: defaults.app.version,
            debug: env_or("APP_DEBUG", defaults.app.debug),
            timezone: std::env::var("APP_TIMEZONE").unwrap_or(defaults.app.timezone),
        };

        Ok(Self {
            database,
            security,
            validation,
            messages: defaults.messages,
            app,
        })
    }

    /// Default configuration pointing at a specific data file.
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.database.path = path.into();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_thresholds() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database.timeout, Duration::from_secs(30));
        assert_eq!(cfg.security.hash_algorithm, "sha256");
        assert_eq!(cfg.security.max_login_attempts, 5);
        assert_eq!(cfg.security.lockout_duration, Duration::from_secs(300));
        assert_eq!(cfg.validation.name_min_length, 2);
        assert_eq!(cfg.validation.name_max_length, 100);
        assert_eq!(cfg.validation.email_max_length, 255);
        assert_eq!(cfg.validation.password_min_length, 6);
        assert_eq!(cfg.validation.password_max_length, 128);
        assert_eq!(cfg.messages.email_taken, "email already registered");
    }

    #[test]
    fn with_database_path_keeps_other_defaults() {
        let cfg = AppConfig::with_database_path("/tmp/other.db");
        assert_eq!(cfg.database.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(cfg.database.max_connections, 5);
    }

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("ACCOUNT_STORE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("ACCOUNT_STORE_TEST_GARBAGE", 7u32), 7);
        std::env::set_var("ACCOUNT_STORE_TEST_NUMBER", "42");
        assert_eq!(env_or("ACCOUNT_STORE_TEST_NUMBER", 7u32), 42);
        assert_eq!(env_or("ACCOUNT_STORE_TEST_MISSING", 7u32), 7);
    }
}
