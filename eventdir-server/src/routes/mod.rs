pub mod events;
pub mod review;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use eventdir_core::error::EventDirError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses, mapping domain errors to their status
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<EventDirError>() {
            Some(EventDirError::EventNotFound(_)) => StatusCode::NOT_FOUND,
            Some(EventDirError::DuplicateEvent)
            | Some(EventDirError::Validation(_))
            | Some(EventDirError::InvalidDate(_)) => StatusCode::BAD_REQUEST,
            Some(EventDirError::Unauthorized) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
