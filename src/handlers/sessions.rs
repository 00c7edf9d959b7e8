use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, BookingError};
use crate::models::{
    AddOnService, BookingForm, ConfirmationRecord, ConfirmationRequest, PaymentMethod,
    RequiredField, TimeSlot,
};
use crate::services::booking::{BookingSession, SubmissionPhase};
use crate::services::pricing::PriceBreakdown;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    id: String,
    venue_id: i64,
    venue_name: String,
    ground: Option<String>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
    slots: Vec<TimeSlot>,
    complete: bool,
    form: BookingForm,
    phase: SubmissionPhase,
    error: Option<String>,
    missing_fields: Vec<RequiredField>,
    price: Option<PriceBreakdown>,
}

impl From<&BookingSession> for SessionView {
    fn from(session: &BookingSession) -> Self {
        let selection = session.selection();
        let missing_fields = match session.last_error() {
            Some(BookingError::ValidationFailure { missing_fields }) => missing_fields.clone(),
            _ => vec![],
        };
        Self {
            id: session.id().to_string(),
            venue_id: selection.venue().id,
            venue_name: selection.venue().name.clone(),
            ground: selection.ground().map(str::to_string),
            date: selection.date(),
            slot: selection.slot().cloned(),
            slots: selection.slots().to_vec(),
            complete: selection.is_complete(),
            form: session.form().clone(),
            phase: session.phase(),
            error: session.last_error().map(|e| e.to_string()),
            missing_fields,
            price: session.preview(),
        }
    }
}

fn view(state: &AppState, id: &str) -> Result<Json<SessionView>, AppError> {
    let view = state.with_session(id, |s| Ok(SessionView::from(&*s)))?;
    Ok(Json(view))
}

/// Fetches the catalog listing for the session's current ground and date, if
/// both are chosen, and attaches it. The session lock is not held while the
/// catalog is queried.
async fn refresh_slots(state: &AppState, id: &str) -> Result<(), AppError> {
    let target = state.with_session(id, |s| {
        let selection = s.selection();
        let ground = selection
            .ground()
            .and_then(|name| selection.venue().ground_by_name(name))
            .map(|g| (g.id, g.name.clone()));
        Ok(match (ground, selection.date()) {
            (Some((ground_id, name)), Some(date)) => {
                Some((selection.venue().id, ground_id, name, date))
            }
            _ => None,
        })
    })?;

    let Some((venue_id, ground_id, ground, date)) = target else {
        return Ok(());
    };

    let slots = state.catalog.list_slots(venue_id, ground_id, date).await?;
    state.with_session(id, |s| {
        s.selection_mut()?.attach_slots(&ground, date, slots);
        Ok(())
    })?;
    Ok(())
}

#[derive(Deserialize)]
pub struct CreateSession {
    pub venue_id: i64,
}

// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSession>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let venue = state
        .catalog
        .get_venue(body.venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {}", body.venue_id)))?;

    let mut session = BookingSession::new(Arc::new(venue));
    session
        .selection_mut()?
        .select_date(chrono::Local::now().date_naive())?;
    let id = session.id().to_string();

    let pruned = state.prune_idle_sessions();
    if pruned > 0 {
        tracing::info!(pruned, "dropped idle booking sessions");
    }

    tracing::info!(session = %id, venue_id = body.venue_id, "booking session started");
    state.sessions().insert(id.clone(), session);

    Ok((StatusCode::CREATED, view(&state, &id)?))
}

// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    view(&state, &id)
}

// DELETE /api/sessions/:id
pub async fn abandon_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut sessions = state.sessions();
    match sessions.get(&id).map(|s| s.phase()) {
        None => Err(BookingError::SessionMissing.into()),
        Some(SubmissionPhase::Submitting) => Err(BookingError::SubmissionInFlight.into()),
        Some(phase) => {
            sessions.remove(&id);
            tracing::info!(session = %id, phase = phase.as_str(), "booking session abandoned");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

#[derive(Deserialize)]
pub struct GroundChoice {
    pub ground: String,
}

// POST /api/sessions/:id/ground
pub async fn select_ground(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<GroundChoice>,
) -> Result<Json<SessionView>, AppError> {
    state.with_session(&id, |s| s.selection_mut()?.select_ground(&body.ground))?;
    refresh_slots(&state, &id).await?;
    view(&state, &id)
}

#[derive(Deserialize)]
pub struct DateChoice {
    pub date: NaiveDate,
}

// POST /api/sessions/:id/date
pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<DateChoice>,
) -> Result<Json<SessionView>, AppError> {
    state.with_session(&id, |s| s.selection_mut()?.select_date(body.date))?;
    refresh_slots(&state, &id).await?;
    view(&state, &id)
}

#[derive(Deserialize)]
pub struct SlotChoice {
    pub slot: String,
}

// POST /api/sessions/:id/slot
pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SlotChoice>,
) -> Result<Json<SessionView>, AppError> {
    refresh_slots(&state, &id).await?;
    state.with_session(&id, |s| s.selection_mut()?.select_slot(&body.slot))?;
    view(&state, &id)
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct FormBody {
    pub player_name: String,
    pub email: String,
    pub phone: String,
    pub team_name: Option<String>,
    pub player_count: Option<u8>,
    pub special_requests: Option<String>,
    pub add_ons: Vec<AddOnService>,
    pub payment_method: Option<PaymentMethod>,
}

// PUT /api/sessions/:id/form
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<FormBody>,
) -> Result<Json<SessionView>, AppError> {
    state.with_session(&id, |s| {
        let mut form = BookingForm::default();
        form.set_player_name(body.player_name);
        form.set_email(body.email);
        form.set_phone(body.phone);
        form.set_team_name(body.team_name);
        form.set_player_count(body.player_count)?;
        form.set_special_requests(body.special_requests);
        form.set_payment_method(body.payment_method);
        for add_on in body.add_ons {
            form.toggle_add_on(add_on, true);
        }
        *s.form_mut()? = form;
        Ok(())
    })?;
    view(&state, &id)
}

// POST /api/sessions/:id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ConfirmationRecord>), AppError> {
    let request = state.with_session(&id, |s| s.begin_submit())?;

    // Runs to completion even if this request is dropped.
    let task = tokio::spawn(confirm(Arc::clone(&state), id, request));
    let record = task.await??;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn confirm(
    state: Arc<AppState>,
    id: String,
    request: ConfirmationRequest,
) -> Result<ConfirmationRecord, BookingError> {
    let outcome = state.confirmer.submit(&request).await;

    let record = state.with_session(&id, |s| s.finish_submit(outcome))?;

    // The flow is over; only the record outlives the session.
    state.history().push(record.clone());
    state.sessions().remove(&id);

    Ok(record)
}
