use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::errors::BookingError;
use crate::models::{
    BookingForm, ConfirmationAck, ConfirmationRecord, ConfirmationRequest, PaymentMethod,
    RequiredField, Selection, SelectionSnapshot, Venue,
};
use crate::services::confirmation::ConfirmationCollaborator;
use crate::services::pricing::{compute_total, price_breakdown, PriceBreakdown};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    /// The collaborator failed; the session can be submitted again.
    Failed,
    Rejected,
    Confirmed,
}

impl SubmissionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Failed => "failed",
            SubmissionPhase::Rejected => "rejected",
            SubmissionPhase::Confirmed => "confirmed",
        }
    }
}

/// What was sent to the collaborator; the record is built from this, not from
/// the live selection and form.
#[derive(Debug, Clone)]
struct InFlight {
    selection: SelectionSnapshot,
    form: BookingForm,
    total_amount: u32,
}

/// One user's booking flow: selection, form and the submission state machine.
#[derive(Debug)]
pub struct BookingSession {
    id: String,
    selection: Selection,
    form: BookingForm,
    phase: SubmissionPhase,
    last_error: Option<BookingError>,
    in_flight: Option<InFlight>,
    record: Option<ConfirmationRecord>,
    last_touched: Instant,
}

impl BookingSession {
    pub fn new(venue: Arc<Venue>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            selection: Selection::new(venue),
            form: BookingForm::default(),
            phase: SubmissionPhase::Idle,
            last_error: None,
            in_flight: None,
            record: None,
            last_touched: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn last_error(&self) -> Option<&BookingError> {
        self.last_error.as_ref()
    }

    pub fn record(&self) -> Option<&ConfirmationRecord> {
        self.record.as_ref()
    }

    pub fn last_touched(&self) -> Instant {
        self.last_touched
    }

    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    pub fn selection_mut(&mut self) -> Result<&mut Selection, BookingError> {
        self.ensure_editable()?;
        Ok(&mut self.selection)
    }

    pub fn form_mut(&mut self) -> Result<&mut BookingForm, BookingError> {
        self.ensure_editable()?;
        Ok(&mut self.form)
    }

    /// Current price, recomputed from the chosen slot and add-ons on each call.
    pub fn preview(&self) -> Option<PriceBreakdown> {
        let slot = self.selection.slot()?;
        Some(price_breakdown(slot.price, &self.form.add_ons))
    }

    /// Runs validation and, when it passes, moves to `Submitting` and returns
    /// the request to hand to the collaborator.
    pub fn begin_submit(&mut self) -> Result<ConfirmationRequest, BookingError> {
        self.ensure_editable()?;
        self.phase = SubmissionPhase::Validating;

        let checked = self.form.validate().and_then(|()| -> Result<_, BookingError> {
            let snapshot = self
                .selection
                .snapshot()
                .ok_or(BookingError::IncompleteSelection)?;
            let method = self.form.payment_method.ok_or(BookingError::ValidationFailure {
                missing_fields: vec![RequiredField::PaymentMethod],
            })?;
            Ok((snapshot, method))
        });
        let (selection, payment_method) = match checked {
            Ok(checked) => checked,
            Err(err) => return Err(self.reject(err)),
        };

        let total_amount = compute_total(selection.slot_price, &self.form.add_ons);
        let request = build_request(&selection, &self.form, payment_method, total_amount);

        self.in_flight = Some(InFlight {
            selection,
            form: self.form.clone(),
            total_amount,
        });
        self.phase = SubmissionPhase::Submitting;
        self.last_error = None;

        tracing::info!(
            session = %self.id,
            venue_id = request.venue_id,
            ground = %request.ground,
            date = %request.date,
            slot = %request.slot,
            total = total_amount,
            "submitting booking"
        );
        Ok(request)
    }

    /// Applies the collaborator's outcome to a session in `Submitting`.
    pub fn finish_submit(
        &mut self,
        outcome: anyhow::Result<ConfirmationAck>,
    ) -> Result<ConfirmationRecord, BookingError> {
        let in_flight = match (self.phase, self.in_flight.take()) {
            (SubmissionPhase::Submitting, Some(in_flight)) => in_flight,
            (SubmissionPhase::Confirmed, _) => return Err(BookingError::AlreadyConfirmed),
            _ => {
                return Err(BookingError::SubmissionFailure(
                    "no submission in progress".to_string(),
                ))
            }
        };

        match outcome {
            Ok(ack) => {
                let record = ConfirmationRecord::new(
                    generate_booking_id(),
                    in_flight.selection,
                    in_flight.form,
                    in_flight.total_amount,
                    ack,
                );
                tracing::info!(
                    session = %self.id,
                    booking_id = record.booking_id(),
                    total = record.total_amount(),
                    "booking confirmed"
                );
                self.phase = SubmissionPhase::Confirmed;
                self.record = Some(record.clone());
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "confirmation failed");
                let err = BookingError::SubmissionFailure(format!("{e:#}"));
                self.phase = SubmissionPhase::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Validates, confirms through `confirmer` and records the outcome.
    pub async fn submit(
        &mut self,
        confirmer: &dyn ConfirmationCollaborator,
    ) -> Result<ConfirmationRecord, BookingError> {
        let request = self.begin_submit()?;
        let outcome = confirmer.submit(&request).await;
        self.finish_submit(outcome)
    }

    fn ensure_editable(&self) -> Result<(), BookingError> {
        match self.phase {
            SubmissionPhase::Validating | SubmissionPhase::Submitting => {
                Err(BookingError::SubmissionInFlight)
            }
            SubmissionPhase::Confirmed => Err(BookingError::AlreadyConfirmed),
            _ => Ok(()),
        }
    }

    fn reject(&mut self, err: BookingError) -> BookingError {
        tracing::info!(session = %self.id, reason = %err, "booking rejected");
        self.phase = SubmissionPhase::Rejected;
        self.last_error = Some(err.clone());
        err
    }
}

fn build_request(
    selection: &SelectionSnapshot,
    form: &BookingForm,
    payment_method: PaymentMethod,
    total_amount: u32,
) -> ConfirmationRequest {
    ConfirmationRequest {
        venue_id: selection.venue_id,
        ground_id: selection.ground_id,
        ground: selection.ground.clone(),
        date: selection.date,
        slot: selection.slot.clone(),
        total_amount,
        player_name: form.player_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        team_name: form.team_name.clone(),
        player_count: form.player_count,
        special_requests: form.special_requests.clone(),
        add_ons: form.add_ons.clone(),
        payment_method,
    }
}

/// `TC` followed by nine uppercase alphanumerics. Unique with high
/// probability only; collisions are not detected.
pub fn generate_booking_id() -> String {
    let entropy = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TC{}", &entropy[..9])
}
