//! Authentication service.
//!
//! Password login for administrator accounts, plus first-boot seeding of the
//! default admin.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DefaultAdminConfig;
use crate::db::{AdminUserRepository, RepositoryError};
use crate::models::AdminUser;

/// Maximum username length (column limit).
const MAX_USERNAME_LENGTH: usize = 64;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username is already taken.
    #[error("username already exists")]
    UsernameTaken,

    /// Username or password failed validation.
    #[error("invalid account data: {0}")]
    InvalidAccount(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Authentication service.
///
/// Handles admin login and account creation.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        let (admin, password_hash) = self
            .admins
            .get_with_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(admin)
    }

    /// Create a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAccount` if the username or password is
    /// empty or the username exceeds the column limit.
    /// Returns `AuthError::UsernameTaken` if the username already exists.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidAccount("username is required".to_owned()));
        }
        if username.len() > MAX_USERNAME_LENGTH {
            return Err(AuthError::InvalidAccount(format!(
                "username must be at most {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidAccount("password is required".to_owned()));
        }

        let password_hash = hash_password(password)?;

        self.admins
            .create(username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })
    }
}

/// Seed the default admin account when no accounts exist yet.
///
/// Mirrors first-boot behavior: the account table being empty means a fresh
/// deployment, so the configured `DASHBOARD_USERNAME`/`DASHBOARD_PASSWORD`
/// pair becomes the first login. No-op when accounts already exist.
///
/// # Errors
///
/// Returns `AuthError` if the seed account cannot be created.
pub async fn ensure_default_admin(
    pool: &PgPool,
    default_admin: Option<&DefaultAdminConfig>,
) -> Result<(), AuthError> {
    let admins = AdminUserRepository::new(pool);

    if admins.count().await? > 0 {
        return Ok(());
    }

    let Some(seed) = default_admin else {
        tracing::warn!(
            "admin_user table is empty and DASHBOARD_USERNAME/DASHBOARD_PASSWORD are not set; \
             no admin account will be available"
        );
        return Ok(());
    };

    let service = AuthService::new(pool);
    let admin = service
        .create_admin(&seed.username, seed.password.expose_secret())
        .await?;
    tracing::info!(username = %admin.username, "Default admin created");

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or the
/// password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
