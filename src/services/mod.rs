pub mod booking;
pub mod catalog;
pub mod confirmation;
pub mod pricing;
