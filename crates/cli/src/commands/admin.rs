//! Admin account management commands.

use shakwa_server::db;
use shakwa_server::services::AuthService;

use super::migrate::database_url;

/// Create a new admin account.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the username is taken,
/// or the account data is invalid.
pub async fn create_account(
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);
    let admin = auth.create_admin(username, password).await?;

    tracing::info!(username = %admin.username, id = admin.id.as_i32(), "Admin account created");
    Ok(())
}
