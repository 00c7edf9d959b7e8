use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

pub const MAX_PLAYERS: u8 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AddOnService {
    EquipmentRental,
    CoachingSession,
}

impl AddOnService {
    pub fn surcharge(&self) -> u32 {
        match self {
            AddOnService::EquipmentRental => 200,
            AddOnService::CoachingSession => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddOnService::EquipmentRental => "Equipment Rental",
            AddOnService::CoachingSession => "Coaching Session",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
    Wallet,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Email,
    Phone,
    PaymentMethod,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
            RequiredField::Phone => "phone",
            RequiredField::PaymentMethod => "payment_method",
        }
    }
}

/// Contact details, add-ons and payment choice for one booking session.
///
/// Setters only assign. Whether the form can be submitted is decided by
/// [`BookingForm::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingForm {
    pub player_name: String,
    pub email: String,
    pub phone: String,
    pub team_name: Option<String>,
    pub player_count: Option<u8>,
    pub special_requests: Option<String>,
    pub add_ons: BTreeSet<AddOnService>,
    pub payment_method: Option<PaymentMethod>,
}

impl BookingForm {
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_team_name(&mut self, team: Option<String>) {
        self.team_name = team.filter(|t| !t.trim().is_empty());
    }

    pub fn set_player_count(&mut self, count: Option<u8>) -> Result<(), BookingError> {
        if let Some(n) = count {
            if n == 0 || n > MAX_PLAYERS {
                return Err(BookingError::InvalidField(format!(
                    "player count must be between 1 and {MAX_PLAYERS}, got {n}"
                )));
            }
        }
        self.player_count = count;
        Ok(())
    }

    pub fn set_special_requests(&mut self, requests: Option<String>) {
        self.special_requests = requests.filter(|r| !r.trim().is_empty());
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = method;
    }

    pub fn toggle_add_on(&mut self, add_on: AddOnService, enabled: bool) {
        if enabled {
            self.add_ons.insert(add_on);
        } else {
            self.add_ons.remove(&add_on);
        }
    }

    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.player_name.trim().is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.email.trim().is_empty() {
            missing.push(RequiredField::Email);
        }
        if self.phone.trim().is_empty() {
            missing.push(RequiredField::Phone);
        }
        if self.payment_method.is_none() {
            missing.push(RequiredField::PaymentMethod);
        }
        missing
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        let missing_fields = self.missing_fields();
        if missing_fields.is_empty() {
            Ok(())
        } else {
            Err(BookingError::ValidationFailure { missing_fields })
        }
    }
}
