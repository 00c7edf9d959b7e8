use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use super::ConfirmationCollaborator;
use crate::db::queries;
use crate::models::{ConfirmationAck, ConfirmationRequest};

/// In-process confirmation: takes the slot off the catalog and acknowledges.
/// Used when no remote confirmation service is configured.
pub struct LocalConfirmationDesk {
    db: Arc<Mutex<Connection>>,
}

impl LocalConfirmationDesk {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfirmationCollaborator for LocalConfirmationDesk {
    async fn submit(&self, request: &ConfirmationRequest) -> anyhow::Result<ConfirmationAck> {
        let newly_blocked = {
            let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
            queries::block_slot(&db, request.ground_id, request.date, &request.slot)?
        };

        if !newly_blocked {
            anyhow::bail!(
                "{} on {} at {} was taken by another booking",
                request.ground,
                request.date,
                request.slot
            );
        }

        tracing::info!(
            venue_id = request.venue_id,
            ground = %request.ground,
            date = %request.date,
            slot = %request.slot,
            amount = request.total_amount,
            "slot confirmed locally"
        );

        Ok(ConfirmationAck {
            reference: Some(format!("LOCAL-{}", uuid::Uuid::new_v4().simple())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::PaymentMethod;
    use chrono::NaiveDate;

    fn request() -> ConfirmationRequest {
        ConfirmationRequest {
            venue_id: 1,
            ground_id: 1,
            ground: "Ground A".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
            slot: "06:00 AM".to_string(),
            total_amount: 800,
            player_name: "Rohit".to_string(),
            email: "rohit@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            team_name: None,
            player_count: None,
            special_requests: None,
            add_ons: Default::default(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[tokio::test]
    async fn test_second_confirmation_of_same_slot_fails() {
        let conn = db::init_db(":memory:").unwrap();
        let desk = LocalConfirmationDesk::new(Arc::new(Mutex::new(conn)));

        let ack = desk.submit(&request()).await.unwrap();
        assert!(ack.reference.unwrap().starts_with("LOCAL-"));
        assert!(desk.submit(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_confirmed_slot_shows_as_taken() {
        let db = Arc::new(Mutex::new(db::init_db(":memory:").unwrap()));
        let desk = LocalConfirmationDesk::new(Arc::clone(&db));
        desk.submit(&request()).await.unwrap();

        let slots = {
            let conn = db.lock().unwrap();
            queries::list_slots(&conn, 1, 1, request().date).unwrap()
        };
        assert!(!slots[0].available);
    }
}
