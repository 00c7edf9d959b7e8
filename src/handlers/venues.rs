use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{TimeSlot, Venue, VenueFilter, VenueSummary};
use crate::state::AppState;

// GET /api/venues?city=&q=
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<VenueFilter>,
) -> Result<Json<Vec<VenueSummary>>, AppError> {
    let venues = state.catalog.search_venues(&filter).await?;
    Ok(Json(venues))
}

// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Venue>, AppError> {
    let venue = state
        .catalog
        .get_venue(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    Ok(Json(venue))
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

// GET /api/venues/:id/grounds/:ground_id/slots?date=YYYY-MM-DD
pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Path((venue_id, ground_id)): Path<(i64, i64)>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let venue = state
        .catalog
        .get_venue(venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {venue_id}")))?;
    if !venue.grounds.iter().any(|g| g.id == ground_id) {
        return Err(AppError::NotFound(format!(
            "ground {ground_id} at venue {venue_id}"
        )));
    }

    let slots = state.catalog.list_slots(venue_id, ground_id, query.date).await?;
    Ok(Json(slots))
}
