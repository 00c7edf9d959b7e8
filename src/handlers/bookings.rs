use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::{AppError, BookingError};
use crate::models::ConfirmationRecord;
use crate::state::AppState;

// GET /api/confirmations/:booking_id
pub async fn get_confirmation(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<ConfirmationRecord>, AppError> {
    let record = state
        .history()
        .iter()
        .find(|r| r.booking_id() == booking_id)
        .cloned();

    match record {
        Some(record) => Ok(Json(record)),
        None => {
            tracing::info!(booking_id = %booking_id, "no such confirmation, restarting flow");
            Err(BookingError::SessionMissing.into())
        }
    }
}

#[derive(Deserialize)]
pub struct BookingsQuery {
    pub limit: Option<usize>,
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Json<Vec<ConfirmationRecord>> {
    let limit = query.limit.unwrap_or(50);
    let records = state
        .history()
        .iter()
        .rev()
        .take(limit)
        .cloned()
        .collect();
    Json(records)
}
