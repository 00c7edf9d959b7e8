use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{AddOnService, BookingForm, PaymentMethod, SelectionSnapshot};

/// What the confirmation collaborator is asked to confirm and charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationRequest {
    pub venue_id: i64,
    pub ground_id: i64,
    pub ground: String,
    pub date: NaiveDate,
    pub slot: String,
    pub total_amount: u32,
    pub player_name: String,
    pub email: String,
    pub phone: String,
    pub team_name: Option<String>,
    pub player_count: Option<u8>,
    pub special_requests: Option<String>,
    pub add_ons: BTreeSet<AddOnService>,
    pub payment_method: PaymentMethod,
}

/// Collaborator's answer to a successful confirmation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationAck {
    #[serde(default)]
    pub reference: Option<String>,
}

/// Result of a successful submission. Built once and never modified.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfirmationRecord {
    booking_id: String,
    selection: SelectionSnapshot,
    form: BookingForm,
    total_amount: u32,
    payment_reference: Option<String>,
    confirmed_at: NaiveDateTime,
}

impl ConfirmationRecord {
    pub(crate) fn new(
        booking_id: String,
        selection: SelectionSnapshot,
        form: BookingForm,
        total_amount: u32,
        ack: ConfirmationAck,
    ) -> Self {
        Self {
            booking_id,
            selection,
            form,
            total_amount,
            payment_reference: ack.reference,
            confirmed_at: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    pub fn selection(&self) -> &SelectionSnapshot {
        &self.selection
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn total_amount(&self) -> u32 {
        self.total_amount
    }

    /// Date of the booked slot.
    pub fn date(&self) -> NaiveDate {
        self.selection.date
    }

    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }
}
