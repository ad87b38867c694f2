//! Dashboard route handlers: login, complaint management, admin accounts,
//! spreadsheet export.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use shakwa_core::{AdminUserId, ComplaintId, ComplaintStatus};

use crate::db::{AdminUserRepository, ComplaintFilter, ComplaintRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::forms::{AddUserForm, LoginForm, UpdateStatusForm};
use crate::middleware::{
    OptionalAdminAuth, RequireAdminAuth, clear_current_admin, push_flash, set_current_admin,
    take_flashes,
};
use crate::models::{Complaint, CurrentAdmin, Flash};
use crate::services::{AuthError, AuthService, export};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Complaint row for the dashboard table.
#[derive(Debug, Clone)]
pub struct ComplaintRowView {
    pub id: i32,
    pub token: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub title: String,
    pub content: String,
    pub status_value: String,
    pub status_label: String,
    pub created_at: String,
}

impl From<&Complaint> for ComplaintRowView {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id.as_i32(),
            token: complaint.token.to_string(),
            name: complaint.name.clone(),
            phone: complaint.phone.to_string(),
            email: complaint
                .email
                .as_ref()
                .map_or_else(|| "—".to_string(), ToString::to_string),
            title: complaint.title.clone(),
            content: complaint.content.clone(),
            status_value: complaint.status.as_str().to_string(),
            status_label: complaint.status.label().to_string(),
            created_at: complaint.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Status option for the filter dropdown and row update forms.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn status_options() -> Vec<StatusOption> {
    ComplaintStatus::ALL
        .iter()
        .map(|s| StatusOption {
            value: s.as_str(),
            label: s.label(),
        })
        .collect()
}

/// Admin account row for the dashboard user list.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub id: i32,
    pub username: String,
    pub is_current: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    flashes: Vec<Flash>,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    flashes: Vec<Flash>,
    admin_username: String,
    total: i64,
    waiting: i64,
    in_process: i64,
    complete: i64,
    complaints: Vec<ComplaintRowView>,
    page: i64,
    total_pages: i64,
    has_prev: bool,
    has_next: bool,
    filter_status: String,
    filter_query: String,
    statuses: Vec<StatusOption>,
    users: Vec<AdminUserView>,
}

// =============================================================================
// Auth Handlers
// =============================================================================

/// Render the login form.
///
/// GET /admin/login
pub async fn login_page(
    session: Session,
    OptionalAdminAuth(admin): OptionalAdminAuth,
) -> Result<Response, AppError> {
    // Already logged in, straight to the dashboard
    if admin.is_some() {
        return Ok(Redirect::to("/admin/dashboard").into_response());
    }

    let template = LoginTemplate {
        flashes: take_flashes(&session).await,
    };
    Ok(Html(template.render()?).into_response())
}

/// Handle a login attempt.
///
/// POST /admin/login
pub async fn login(
    session: Session,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(admin) => {
            let current = CurrentAdmin {
                id: admin.id,
                username: admin.username.clone(),
            };
            set_current_admin(&session, &current).await?;
            tracing::info!(username = %admin.username, "Admin logged in");
            Ok(Redirect::to("/admin/dashboard"))
        }
        Err(AuthError::InvalidCredentials) => {
            push_flash(
                &session,
                Flash::danger("اسم المستخدم أو كلمة المرور غير صحيحة"),
            )
            .await?;
            Ok(Redirect::to("/admin/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Log out and clear the session.
///
/// GET /admin/logout
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    Ok(Redirect::to("/admin/login"))
}

// =============================================================================
// Dashboard Handlers
// =============================================================================

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    page: Option<i64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    q: Option<String>,
}

/// Render the dashboard: statistics, filtered complaint listing, user list.
///
/// GET /admin/dashboard
pub async fn dashboard(
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let complaints = ComplaintRepository::new(state.pool());
    let admins = AdminUserRepository::new(state.pool());

    let filter_status = params.status.unwrap_or_default();
    let filter_query = params.q.map(|q| q.trim().to_string()).unwrap_or_default();
    let filter = ComplaintFilter {
        status: status_filter(&filter_status),
        query: (!filter_query.is_empty()).then(|| filter_query.clone()),
    };

    let counts = complaints.status_counts().await?;
    let page = complaints.search(&filter, params.page.unwrap_or(1)).await?;
    let users = admins.list_all().await?;

    let template = DashboardTemplate {
        flashes: take_flashes(&session).await,
        admin_username: admin.username.clone(),
        total: counts.total,
        waiting: counts.waiting,
        in_process: counts.in_process,
        complete: counts.complete,
        complaints: page.items.iter().map(ComplaintRowView::from).collect(),
        page: page.page,
        total_pages: page.total_pages,
        has_prev: page.has_prev(),
        has_next: page.has_next(),
        filter_status,
        filter_query,
        statuses: status_options(),
        users: users
            .iter()
            .map(|u| AdminUserView {
                id: u.id.as_i32(),
                username: u.username.clone(),
                is_current: u.id == admin.id,
            })
            .collect(),
    };
    Ok(Html(template.render()?))
}

/// Map the raw `?status=` value onto a listing filter.
///
/// An unknown status value means "no filter": the dashboard lists everything
/// rather than showing an empty page for a mistyped query string.
fn status_filter(raw: &str) -> Option<ComplaintStatus> {
    raw.parse::<ComplaintStatus>().ok()
}

/// Query parameters for the status update redirect.
#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    #[serde(default)]
    page: Option<i64>,
}

/// Update a complaint's status.
///
/// POST /admin/complaints/update/{id}
///
/// Rejects unknown status values with 400 rather than storing them.
pub async fn update_complaint(
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<UpdateQuery>,
    axum::Form(form): axum::Form<UpdateStatusForm>,
) -> Result<Redirect, AppError> {
    let status: ComplaintStatus = form
        .status
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown status: {}", form.status)))?;

    let repo = ComplaintRepository::new(state.pool());
    match repo.update_status(ComplaintId::new(id), status).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound(format!("no complaint with id {id}")));
        }
        Err(e) => return Err(e.into()),
    }

    push_flash(&session, Flash::success("تم تحديث حالة الشكوى")).await?;

    let page = params.page.unwrap_or(1);
    Ok(Redirect::to(&format!("/admin/dashboard?page={page}")))
}

// =============================================================================
// Admin Account Handlers
// =============================================================================

/// Create another admin account.
///
/// POST /admin/dashboard
pub async fn create_user(
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<AddUserForm>,
) -> Result<Redirect, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.create_admin(&form.username, &form.password).await {
        Ok(admin) => {
            tracing::info!(username = %admin.username, "Admin account created");
            push_flash(&session, Flash::success("تمت إضافة المستخدم بنجاح")).await?;
        }
        Err(AuthError::UsernameTaken) => {
            push_flash(&session, Flash::danger("اسم المستخدم موجود بالفعل")).await?;
        }
        Err(AuthError::InvalidAccount(_)) => {
            push_flash(&session, Flash::danger("اسم المستخدم وكلمة المرور مطلوبان")).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/admin/dashboard"))
}

/// Delete an admin account.
///
/// POST /admin/users/delete/{id}
///
/// Admins cannot delete their own account.
pub async fn delete_user(
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let id = AdminUserId::new(id);

    if id == admin.id {
        push_flash(&session, Flash::danger("لا يمكن حذف المستخدم الحالي")).await?;
        return Ok(Redirect::to("/admin/dashboard"));
    }

    let admins = AdminUserRepository::new(state.pool());
    match admins.delete(id).await {
        Ok(()) => {
            push_flash(&session, Flash::success("تم حذف المستخدم")).await?;
            Ok(Redirect::to("/admin/dashboard"))
        }
        Err(RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("no admin with id {}", id.as_i32())))
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Export Handler
// =============================================================================

/// Download every complaint as a spreadsheet.
///
/// GET /admin/export
pub async fn export_complaints(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let repo = ComplaintRepository::new(state.pool());
    let complaints = repo.list_all().await?;

    let buffer = export::complaints_workbook(&complaints)?;
    tracing::info!(rows = complaints.len(), "Complaints exported");

    let headers = [
        (header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export::EXPORT_FILE_NAME),
        ),
    ];
    Ok((headers, buffer).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_known_values() {
        assert_eq!(status_filter("waiting"), Some(ComplaintStatus::Waiting));
        assert_eq!(status_filter("in process"), Some(ComplaintStatus::InProcess));
        assert_eq!(status_filter("complete"), Some(ComplaintStatus::Complete));
    }

    #[test]
    fn test_status_filter_unknown_lists_everything() {
        // A mistyped or stale status must not hide the listing.
        assert_eq!(status_filter("done"), None);
        assert_eq!(status_filter(""), None);
        assert_eq!(status_filter("WAITING"), None);
    }
}
