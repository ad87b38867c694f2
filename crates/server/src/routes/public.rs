//! Public route handlers: complaint submission and tracking.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use shakwa_core::TrackingToken;

use crate::db::ComplaintRepository;
use crate::error::AppError;
use crate::filters;
use crate::forms::{ComplaintForm, FieldErrors};
use crate::middleware::{push_flash, take_flashes};
use crate::models::{Complaint, Flash, NewComplaint};
use crate::state::AppState;

/// Complaint view for the tracking page.
#[derive(Debug, Clone)]
pub struct ComplaintView {
    pub token: String,
    pub title: String,
    pub content: String,
    pub status_label: String,
    pub created_at: String,
}

impl From<&Complaint> for ComplaintView {
    fn from(complaint: &Complaint) -> Self {
        Self {
            token: complaint.token.to_string(),
            title: complaint.title.clone(),
            content: complaint.content.clone(),
            status_label: complaint.status.label().to_string(),
            created_at: complaint.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Submission form template.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flashes: Vec<Flash>,
    errors: FieldErrors,
    form: ComplaintForm,
}

/// Tracking page template.
#[derive(Template)]
#[template(path = "track.html")]
struct TrackTemplate {
    flashes: Vec<Flash>,
    complaint: ComplaintView,
}

/// Render the submission form.
///
/// GET /
pub async fn index(session: Session) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        flashes: take_flashes(&session).await,
        errors: FieldErrors::new(),
        form: ComplaintForm::default(),
    };
    Ok(Html(template.render()?))
}

/// Handle a complaint submission.
///
/// POST /
///
/// On validation failure the form is re-rendered with field errors; on
/// success a tracking link is flashed and the client is redirected back to
/// the form.
pub async fn submit(
    session: Session,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<ComplaintForm>,
) -> Result<Response, AppError> {
    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(errors) => {
            let template = IndexTemplate {
                flashes: take_flashes(&session).await,
                errors,
                form,
            };
            return Ok(Html(template.render()?).into_response());
        }
    };

    let new = NewComplaint {
        token: TrackingToken::generate(),
        name: validated.name,
        phone: validated.phone,
        email: validated.email,
        title: validated.title,
        content: validated.content,
    };

    let repo = ComplaintRepository::new(state.pool());
    let complaint = repo.create(&new).await?;

    tracing::info!(token = %complaint.token, "Complaint submitted");

    let track_url = state.config().track_url(complaint.token.as_str());
    push_flash(
        &session,
        Flash::success(format!(
            "تم إرسال شكوتك بنجاح. قم بنسخ رابط التتبع و الاحتفاظ به لكي تتمكن من تتبع شكوتك. رابط التتبع : {track_url}"
        )),
    )
    .await?;

    Ok(Redirect::to("/").into_response())
}

/// Show a complaint's status by its tracking token.
///
/// GET /track/{token}
///
/// An unknown or malformed token yields 404.
pub async fn track(
    session: Session,
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Html<String>, AppError> {
    let token = TrackingToken::parse(&token)
        .map_err(|_| AppError::NotFound(format!("invalid token: {token}")))?;

    let repo = ComplaintRepository::new(state.pool());
    let complaint = repo
        .get_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no complaint with token {token}")))?;

    let template = TrackTemplate {
        flashes: take_flashes(&session).await,
        complaint: ComplaintView::from(&complaint),
    };
    Ok(Html(template.render()?))
}
