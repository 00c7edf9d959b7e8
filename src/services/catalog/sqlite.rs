use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;

use super::CatalogService;
use crate::db::queries;
use crate::models::{TimeSlot, Venue, VenueFilter, VenueSummary};

pub struct SqliteCatalog {
    db: Arc<Mutex<Connection>>,
}

impl SqliteCatalog {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogService for SqliteCatalog {
    async fn get_venue(&self, venue_id: i64) -> anyhow::Result<Option<Venue>> {
        let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
        queries::get_venue(&db, venue_id)
    }

    async fn list_slots(
        &self,
        venue_id: i64,
        ground_id: i64,
        date: NaiveDate,
    ) -> anyhow::Result<Vec<TimeSlot>> {
        let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
        queries::list_slots(&db, venue_id, ground_id, date)
    }

    async fn search_venues(&self, filter: &VenueFilter) -> anyhow::Result<Vec<VenueSummary>> {
        let venues = {
            let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
            queries::list_venues(&db)?
        };
        Ok(venues.into_iter().filter(|v| filter.matches(v)).collect())
    }
}
