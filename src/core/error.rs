use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::reports::ReportError;
use crate::features::reports::store::StoreError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Report(ref e) => report_error_parts(e),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Auth(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

/// Status, message and error list for a report failure.
///
/// The first entry of `errors` is always the message key of the failure kind
/// so the presentation layer can select its own wording.
fn report_error_parts(err: &ReportError) -> (StatusCode, String, Option<Vec<String>>) {
    let key = err.kind().message_key().to_string();
    match err {
        ReportError::Validation(fields) => {
            let mut errors = vec![key];
            errors.extend(ReportError::field_messages(fields));
            (StatusCode::BAD_REQUEST, err.to_string(), Some(errors))
        }
        ReportError::DateConflict { .. } => {
            (StatusCode::CONFLICT, err.to_string(), Some(vec![key]))
        }
        ReportError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string(), Some(vec![key])),
        ReportError::Store(StoreError::Database(e)) => {
            tracing::error!("Database error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error occurred".to_string(),
                None,
            )
        }
        ReportError::Store(e) => {
            tracing::error!("Store error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                None,
            )
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
