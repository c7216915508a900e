//! Staff review endpoints, guarded by a bearer token from the config.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

use eventdir_core::error::EventDirError;
use eventdir_core::event::{Event, EventPatch, EventStatus};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events/submit/review", get(pending_events))
        .route("/events/submit/{id}", post(manage_submission))
        .route("/events/{id}", put(update_event).delete(delete_event))
}

/// Check the Authorization header against the configured review token.
/// A missing token in the config disables the review API entirely.
fn check_token(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = state.review_token() else {
        return Err(EventDirError::Unauthorized.into());
    };

    let provided = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(EventDirError::Unauthorized.into()),
    }
}

/// GET /events/submit/review - Submissions waiting for review
async fn pending_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, AppError> {
    check_token(&state, &headers)?;

    let pending = state.agenda().pending()?;
    Ok(Json(pending))
}

/// Action applied to a submitted event
#[derive(Deserialize)]
pub struct ManageSubmission {
    pub action: ReviewAction,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approved,
    Declined,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /events/submit/:id - Approve or decline a submission.
/// Declined submissions are deleted.
async fn manage_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ManageSubmission>,
) -> Result<Json<MessageResponse>, AppError> {
    check_token(&state, &headers)?;

    let agenda = state.agenda();
    match body.action {
        ReviewAction::Approved => {
            let event = agenda.set_status(&id, EventStatus::Approved)?;
            tracing::info!(id = %event.id, "submission approved");
            Ok(Json(MessageResponse {
                message: "Event status updated".to_string(),
            }))
        }
        ReviewAction::Declined => {
            agenda.delete_event(&id)?;
            tracing::info!(id = %id, "submission declined and deleted");
            Ok(Json(MessageResponse {
                message: "Event declined and deleted".to_string(),
            }))
        }
    }
}

/// PUT /events/:id - Partial update of an event record
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    check_token(&state, &headers)?;

    let event = state.agenda().update_event(&id, &patch)?;
    Ok(Json(event))
}

/// DELETE /events/:id - Delete an event record
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    check_token(&state, &headers)?;

    state.agenda().delete_event(&id)?;
    Ok(Json(MessageResponse {
        message: "Event deleted".to_string(),
    }))
}
