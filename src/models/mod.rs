pub mod booking_form;
pub mod confirmation;
pub mod selection;
pub mod slot;
pub mod venue;

pub use booking_form::{AddOnService, BookingForm, PaymentMethod, RequiredField};
pub use confirmation::{ConfirmationAck, ConfirmationRecord, ConfirmationRequest};
pub use selection::{Selection, SelectionSnapshot};
pub use slot::TimeSlot;
pub use venue::{Ground, GroundTier, Venue, VenueFilter, VenueSummary};
