//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHAKWA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//! - `SHAKWA_BASE_URL` - Public URL of the server, used to build tracking
//!   links in confirmation messages
//! - `SHAKWA_SECRET_KEY` - Application secret (min 32 chars, no placeholder
//!   values)
//!
//! ## Optional
//! - `SHAKWA_HOST` - Bind address (default: 127.0.0.1)
//! - `SHAKWA_PORT` - Listen port (default: 3000)
//! - `DASHBOARD_USERNAME` / `DASHBOARD_PASSWORD` - Credentials for the
//!   default admin seeded on first boot when no accounts exist
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
    "dev_key",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Shakwa server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, without trailing slash
    pub base_url: String,
    /// Application secret key
    pub secret_key: SecretString,
    /// Credentials for seeding the first admin account
    pub default_admin: Option<DefaultAdminConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Default admin credentials, used only when the `admin_user` table is empty.
#[derive(Clone)]
pub struct DefaultAdminConfig {
    /// Username of the seeded account
    pub username: String,
    /// Plain-text password, hashed before storage
    pub password: SecretString,
}

impl std::fmt::Debug for DefaultAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the secret key fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHAKWA_DATABASE_URL")?;
        let host = get_env_or_default("SHAKWA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHAKWA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHAKWA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHAKWA_PORT".to_string(), e.to_string()))?;
        let base_url = parse_base_url(&get_required_env("SHAKWA_BASE_URL")?)?;

        let secret_key = get_required_env("SHAKWA_SECRET_KEY")?;
        validate_secret_key(&secret_key, "SHAKWA_SECRET_KEY")?;
        let secret_key = SecretString::from(secret_key);

        let default_admin = DefaultAdminConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            secret_key,
            default_admin,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the absolute tracking URL for a token.
    #[must_use]
    pub fn track_url(&self, token: &str) -> String {
        format!("{}/track/{token}", self.base_url)
    }
}

impl DefaultAdminConfig {
    fn from_env() -> Option<Self> {
        let username = get_optional_env("DASHBOARD_USERNAME")?;
        let password = get_optional_env("DASHBOARD_PASSWORD")?;
        Some(Self {
            username,
            password: SecretString::from(password),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to the generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate the base URL and strip any trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("SHAKWA_BASE_URL".to_string(), e.to_string()))?;
    Ok(raw.trim_end_matches('/').to_string())
}

/// Validate that the secret key has a sane length and is not a placeholder.
fn validate_secret_key(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_KEY_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SECRET_KEY_LENGTH,
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_key_too_short() {
        let result = validate_secret_key("short", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_key_placeholder() {
        let value = format!("changeme{}", "a".repeat(32));
        let result = validate_secret_key(&value, "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_key_dev_key() {
        let value = format!("dev_key{}", "a".repeat(32));
        assert!(validate_secret_key(&value, "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_key_valid() {
        let result = validate_secret_key("aB3$cJ9!mK2@nL5#pQ7&rT0*uW4^zC6q", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_base_url_strips_trailing_slash() {
        let url = parse_base_url("http://localhost:3000/").unwrap();
        assert_eq!(url, "http://localhost:3000");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_track_url() {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            secret_key: SecretString::from("x".repeat(32)),
            default_admin: None,
            sentry_dsn: None,
        };

        assert_eq!(
            config.track_url("deadbeef0123"),
            "http://localhost:3000/track/deadbeef0123"
        );
        assert_eq!(config.socket_addr().port(), 3000);
    }

    #[test]
    fn test_default_admin_debug_redacts_password() {
        let admin = DefaultAdminConfig {
            username: "admin".to_string(),
            password: SecretString::from("super_secret_password"),
        };

        let debug_output = format!("{admin:?}");
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }
}
