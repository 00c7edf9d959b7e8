use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::models::RequiredField;

/// Failures of the booking workflow itself. None of these is fatal; every
/// variant is recovered by re-selecting, re-filling or re-submitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("missing required fields: {}", join_fields(.missing_fields))]
    ValidationFailure { missing_fields: Vec<RequiredField> },

    #[error("selection is incomplete: choose a ground, date and available slot")]
    IncompleteSelection,

    #[error("submission failed, please retry: {0}")]
    SubmissionFailure(String),

    #[error("a submission is already in progress for this session")]
    SubmissionInFlight,

    #[error("this booking has already been confirmed")]
    AlreadyConfirmed,

    #[error("no active booking session")]
    SessionMissing,
}

impl BookingError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::SubmissionFailure(_))
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("catalog error: {0}")]
    Catalog(#[from] anyhow::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Booking(#[from] BookingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Catalog(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Booking(err) => match err {
                BookingError::InvalidSelection(_)
                | BookingError::InvalidField(_)
                | BookingError::ValidationFailure { .. }
                | BookingError::IncompleteSelection => StatusCode::UNPROCESSABLE_ENTITY,
                BookingError::SubmissionFailure(_) => StatusCode::BAD_GATEWAY,
                BookingError::SubmissionInFlight | BookingError::AlreadyConfirmed => {
                    StatusCode::CONFLICT
                }
                // Navigation boundary: no session means start the flow over
                BookingError::SessionMissing => {
                    return (StatusCode::SEE_OTHER, [(header::LOCATION, "/")]).into_response();
                }
            },
        };

        let body = match &self {
            AppError::Booking(BookingError::ValidationFailure { missing_fields }) => {
                serde_json::json!({
                    "error": self.to_string(),
                    "missing_fields": missing_fields,
                })
            }
            AppError::Booking(err) => serde_json::json!({
                "error": self.to_string(),
                "retryable": err.is_retryable(),
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
