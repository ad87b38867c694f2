//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                               - Complaint submission form
//! POST /                               - Submit a complaint
//! GET  /track/{token}                  - Track a complaint by token
//! GET  /spam                           - Rate limit demo
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (pings the database)
//!
//! # Dashboard
//! GET  /admin/login                    - Login page
//! POST /admin/login                    - Login action
//! GET  /admin/logout                   - Logout action
//! GET  /admin/dashboard                - Statistics, filtered listing, users
//! POST /admin/dashboard                - Create another admin account
//! POST /admin/complaints/update/{id}   - Update a complaint status
//! POST /admin/users/delete/{id}        - Delete an admin account
//! GET  /admin/export                   - Download all complaints as XLSX
//! ```

pub mod admin;
pub mod demo;
pub mod public;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};

use crate::error::error_page;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Public routes: submission form and tracking, ~20 requests/minute per IP.
///
/// Each route carries its own limiter instance so submission traffic and
/// tracking traffic draw from separate per-IP budgets.
pub fn public_routes() -> Router<AppState> {
    let submit = Router::new()
        .route("/", get(public::index).post(public::submit))
        .layer(rate_limit::public_rate_limiter());
    let track = Router::new()
        .route("/track/{token}", get(public::track))
        .layer(rate_limit::public_rate_limiter());
    submit.merge(track)
}

/// Login routes, ~5 requests/hour per IP.
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .layer(rate_limit::login_rate_limiter())
}

/// Authenticated dashboard routes.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/logout", get(admin::logout))
        .route(
            "/admin/dashboard",
            get(admin::dashboard).post(admin::create_user),
        )
        .route("/admin/complaints/update/{id}", post(admin::update_complaint))
        .route("/admin/users/delete/{id}", post(admin::delete_user))
        .route("/admin/export", get(admin::export_complaints))
}

/// Demo routes, ~3 requests/minute per IP.
pub fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/spam", get(demo::spam))
        .layer(rate_limit::demo_rate_limiter())
}

/// Liveness check.
///
/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// Readiness check: verifies the database connection.
///
/// GET /health/ready
async fn health_ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        })?;
    Ok("OK")
}

/// Localized page for unmatched routes.
async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND)
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health_ready))
        .merge(public_routes())
        .merge(login_routes())
        .merge(dashboard_routes())
        .merge(demo_routes())
        .fallback(not_found)
}
