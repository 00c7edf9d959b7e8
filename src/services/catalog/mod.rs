pub mod sqlite;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{TimeSlot, Venue, VenueFilter, VenueSummary};

/// Read-only venue directory. Every call returns a snapshot taken at call time.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_venue(&self, venue_id: i64) -> anyhow::Result<Option<Venue>>;

    /// All slots for the ground on `date`, in time order, taken or not.
    async fn list_slots(
        &self,
        venue_id: i64,
        ground_id: i64,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<TimeSlot>>;

    async fn search_venues(&self, filter: &VenueFilter) -> anyhow::Result<Vec<VenueSummary>>;
}
