pub mod bookings;
pub mod health;
pub mod sessions;
pub mod venues;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/venues", get(venues::list_venues))
        .route("/api/venues/:id", get(venues::get_venue))
        .route(
            "/api/venues/:id/grounds/:ground_id/slots",
            get(venues::list_slots),
        )
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:id",
            get(sessions::get_session).delete(sessions::abandon_session),
        )
        .route("/api/sessions/:id/ground", post(sessions::select_ground))
        .route("/api/sessions/:id/date", post(sessions::select_date))
        .route("/api/sessions/:id/slot", post(sessions::select_slot))
        .route("/api/sessions/:id/form", put(sessions::update_form))
        .route("/api/sessions/:id/submit", post(sessions::submit))
        .route(
            "/api/confirmations/:booking_id",
            get(bookings::get_confirmation),
        )
        .route("/api/bookings", get(bookings::list_bookings))
        .with_state(state)
}
