use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::slot::{find_slot, TimeSlot};
use crate::models::Venue;

/// Catalog listing that was fetched for one ground+date pair.
#[derive(Debug, Clone)]
struct SlotListing {
    ground: String,
    date: NaiveDate,
    slots: Vec<TimeSlot>,
}

/// The user's venue, ground, date and slot choices for one booking session.
///
/// A slot can only be chosen from the listing attached for the current
/// ground and date. Changing either of those drops the listing and the slot.
#[derive(Debug, Clone)]
pub struct Selection {
    venue: Arc<Venue>,
    ground: Option<String>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
    listing: Option<SlotListing>,
}

impl Selection {
    pub fn new(venue: Arc<Venue>) -> Self {
        Self {
            venue,
            ground: None,
            date: None,
            slot: None,
            listing: None,
        }
    }

    pub fn venue(&self) -> &Arc<Venue> {
        &self.venue
    }

    pub fn ground(&self) -> Option<&str> {
        self.ground.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    pub fn slots(&self) -> &[TimeSlot] {
        self.listing.as_ref().map(|l| l.slots.as_slice()).unwrap_or(&[])
    }

    pub fn select_ground(&mut self, name: &str) -> Result<(), BookingError> {
        if self.venue.ground_by_name(name).is_none() {
            return Err(BookingError::InvalidSelection(format!(
                "{} has no ground named {name:?}",
                self.venue.name
            )));
        }
        self.ground = Some(name.to_string());
        self.clear_slot();
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.select_date_on(date, chrono::Local::now().date_naive())
    }

    /// Same as [`Selection::select_date`] with an explicit notion of today.
    pub fn select_date_on(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        if date < today {
            return Err(BookingError::InvalidSelection(format!(
                "{date} is in the past"
            )));
        }
        self.date = Some(date);
        self.clear_slot();
        Ok(())
    }

    /// Installs the catalog listing for `ground` on `date`. Listings fetched
    /// for a pair that is no longer current are dropped and `false` returned.
    /// A chosen slot the new listing no longer offers at the same price is
    /// cleared.
    pub fn attach_slots(&mut self, ground: &str, date: NaiveDate, slots: Vec<TimeSlot>) -> bool {
        if self.ground.as_deref() != Some(ground) || self.date != Some(date) {
            tracing::debug!(ground, %date, "discarding stale slot listing");
            return false;
        }
        let still_bookable = self.slot.as_ref().map(|s| {
            find_slot(&slots, &s.time).is_some_and(|l| l.available && l.price == s.price)
        });
        if still_bookable == Some(false) {
            self.slot = None;
        }
        self.listing = Some(SlotListing {
            ground: ground.to_string(),
            date,
            slots,
        });
        true
    }

    pub fn select_slot(&mut self, label: &str) -> Result<(), BookingError> {
        let listing = self.current_listing().ok_or_else(|| {
            BookingError::InvalidSelection("choose a ground and date before a slot".to_string())
        })?;
        let slot = find_slot(&listing.slots, label).ok_or_else(|| {
            BookingError::InvalidSelection(format!("no {label} slot on {}", listing.date))
        })?;
        if !slot.available {
            return Err(BookingError::InvalidSelection(format!(
                "the {label} slot on {} is already taken",
                listing.date
            )));
        }
        self.slot = Some(slot.clone());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        match (&self.slot, self.current_listing()) {
            (Some(slot), Some(listing)) => find_slot(&listing.slots, &slot.time)
                .is_some_and(|listed| listed.available && listed.price == slot.price),
            _ => false,
        }
    }

    pub fn snapshot(&self) -> Option<SelectionSnapshot> {
        if !self.is_complete() {
            return None;
        }
        let ground = self.venue.ground_by_name(self.ground.as_deref()?)?;
        let date = self.date?;
        let slot = self.slot.clone()?;
        Some(SelectionSnapshot {
            venue_id: self.venue.id,
            venue_name: self.venue.name.clone(),
            venue_location: self.venue.location.clone(),
            venue_address: self.venue.address.clone(),
            ground_id: ground.id,
            ground: ground.name.clone(),
            date,
            slot: slot.time,
            slot_price: slot.price,
        })
    }

    fn current_listing(&self) -> Option<&SlotListing> {
        let listing = self.listing.as_ref()?;
        let current = self.ground.as_deref() == Some(listing.ground.as_str())
            && self.date == Some(listing.date);
        current.then_some(listing)
    }

    fn clear_slot(&mut self) {
        self.slot = None;
        self.listing = None;
    }
}

/// Frozen copy of a complete selection, carried into the confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionSnapshot {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_location: String,
    pub venue_address: String,
    pub ground_id: i64,
    pub ground: String,
    pub date: NaiveDate,
    pub slot: String,
    pub slot_price: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ground, GroundTier};

    fn venue() -> Arc<Venue> {
        Arc::new(Venue {
            id: 1,
            name: "Cricket Zone Arena".to_string(),
            city: "Mumbai".to_string(),
            location: "Bandra West, Mumbai".to_string(),
            address: "123 Cricket Street".to_string(),
            description: String::new(),
            phone: "+91 98765 43210".to_string(),
            email: "info@cricketzone.com".to_string(),
            timings: "6:00 AM - 11:00 PM".to_string(),
            price_range: String::new(),
            rating: 4.5,
            reviews: 127,
            amenities: vec![],
            grounds: vec![
                Ground {
                    id: 1,
                    name: "Ground A".to_string(),
                    capacity: "12 players".to_string(),
                    tier: GroundTier::Premium,
                },
                Ground {
                    id: 2,
                    name: "Ground B".to_string(),
                    capacity: "16 players".to_string(),
                    tier: GroundTier::Standard,
                },
            ],
        })
    }

    fn slots() -> Vec<TimeSlot> {
        vec![
            TimeSlot { time: "07:00 AM".to_string(), price: 800, available: true },
            TimeSlot { time: "08:00 AM".to_string(), price: 900, available: false },
            TimeSlot { time: "12:00 PM".to_string(), price: 1200, available: true },
        ]
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ready() -> Selection {
        let mut sel = Selection::new(venue());
        sel.select_ground("Ground A").unwrap();
        sel.select_date_on(day("2025-06-16"), day("2025-06-10")).unwrap();
        assert!(sel.attach_slots("Ground A", day("2025-06-16"), slots()));
        sel
    }

    #[test]
    fn test_complete_selection() {
        let mut sel = ready();
        assert!(!sel.is_complete());
        sel.select_slot("12:00 PM").unwrap();
        assert!(sel.is_complete());
        let snap = sel.snapshot().unwrap();
        assert_eq!(snap.ground, "Ground A");
        assert_eq!(snap.ground_id, 1);
        assert_eq!(snap.slot_price, 1200);
    }

    #[test]
    fn test_unavailable_slot_rejected() {
        let mut sel = ready();
        let err = sel.select_slot("08:00 AM").unwrap_err();
        assert!(matches!(err, BookingError::InvalidSelection(_)));
        assert!(!sel.is_complete());
        assert!(sel.slot().is_none());
    }

    #[test]
    fn test_every_unavailable_slot_rejected() {
        for slot in slots().iter().filter(|s| !s.available) {
            let mut sel = ready();
            assert!(matches!(
                sel.select_slot(&slot.time),
                Err(BookingError::InvalidSelection(_))
            ));
        }
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let mut sel = ready();
        assert!(matches!(
            sel.select_slot("03:00 AM"),
            Err(BookingError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_slot_requires_listing() {
        let mut sel = Selection::new(venue());
        sel.select_ground("Ground A").unwrap();
        assert!(sel.select_slot("07:00 AM").is_err());
    }

    #[test]
    fn test_reselecting_ground_clears_slot() {
        let mut sel = ready();
        sel.select_slot("07:00 AM").unwrap();
        sel.select_ground("Ground B").unwrap();
        assert!(sel.slot().is_none());
        assert!(!sel.is_complete());
        assert!(sel.slots().is_empty());
    }

    #[test]
    fn test_reselecting_date_clears_slot() {
        let mut sel = ready();
        sel.select_slot("07:00 AM").unwrap();
        sel.select_date_on(day("2025-06-17"), day("2025-06-10")).unwrap();
        assert!(sel.slot().is_none());
        assert!(!sel.is_complete());
    }

    #[test]
    fn test_unknown_ground_rejected() {
        let mut sel = Selection::new(venue());
        assert!(matches!(
            sel.select_ground("Ground Z"),
            Err(BookingError::InvalidSelection(_))
        ));
        assert!(sel.ground().is_none());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut sel = Selection::new(venue());
        let result = sel.select_date_on(day("2025-06-09"), day("2025-06-10"));
        assert!(result.is_err());
        assert!(sel.date().is_none());
        assert!(sel.select_date_on(day("2025-06-10"), day("2025-06-10")).is_ok());
    }

    #[test]
    fn test_stale_listing_discarded() {
        let mut sel = Selection::new(venue());
        sel.select_ground("Ground A").unwrap();
        sel.select_date_on(day("2025-06-16"), day("2025-06-10")).unwrap();
        sel.select_ground("Ground B").unwrap();
        assert!(!sel.attach_slots("Ground A", day("2025-06-16"), slots()));
        assert!(sel.select_slot("07:00 AM").is_err());
    }

    #[test]
    fn test_refreshed_listing_invalidates_taken_slot() {
        let mut sel = ready();
        sel.select_slot("07:00 AM").unwrap();
        let mut refreshed = slots();
        refreshed[0].available = false;
        sel.attach_slots("Ground A", day("2025-06-16"), refreshed);
        assert!(!sel.is_complete());
        assert!(sel.slot().is_none());
    }

    #[test]
    fn test_refreshed_listing_keeps_slot_still_on_offer() {
        let mut sel = ready();
        sel.select_slot("12:00 PM").unwrap();
        sel.attach_slots("Ground A", day("2025-06-16"), slots());
        assert!(sel.is_complete());
        assert_eq!(sel.slot().unwrap().price, 1200);
    }

    #[test]
    fn test_refreshed_listing_with_new_price_clears_slot() {
        let mut sel = ready();
        sel.select_slot("12:00 PM").unwrap();
        let mut refreshed = slots();
        refreshed[2].price = 1500;
        sel.attach_slots("Ground A", day("2025-06-16"), refreshed);
        assert!(sel.slot().is_none());
    }
}
