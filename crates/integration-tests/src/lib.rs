//! Integration tests for Shakwa.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the server
//! cargo run -p shakwa-cli -- migrate
//! cargo run -p shakwa-server
//!
//! # Run integration tests against it
//! cargo test -p shakwa-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server.

use reqwest::Client;

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHAKWA_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Credentials for the seeded default admin.
#[must_use]
pub fn admin_credentials() -> (String, String) {
    let username =
        std::env::var("DASHBOARD_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password =
        std::env::var("DASHBOARD_PASSWORD").unwrap_or_else(|_| "admin-password".to_string());
    (username, password)
}

/// HTTP client with a cookie store, not following redirects.
///
/// Redirects are left to the tests so they can assert on `Location`.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as the default admin and return the authenticated client.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn authenticated_client() -> Client {
    let client = client();
    let (username, password) = admin_credentials();

    let resp = client
        .post(format!("{}/admin/login", base_url()))
        .form(&[("username", username.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        resp.status().is_redirection(),
        "login should redirect, got {}",
        resp.status()
    );
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/admin/dashboard", "login should land on the dashboard");

    client
}
