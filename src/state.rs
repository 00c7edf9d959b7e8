use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::config::AppConfig;
use crate::errors::BookingError;
use crate::models::ConfirmationRecord;
use crate::services::booking::{BookingSession, SubmissionPhase};
use crate::services::catalog::CatalogService;
use crate::services::confirmation::ConfirmationCollaborator;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Box<dyn CatalogService>,
    pub confirmer: Box<dyn ConfirmationCollaborator>,
    pub sessions: Mutex<HashMap<String, BookingSession>>,
    /// Confirmed bookings, oldest first. Only ever appended to.
    pub history: Mutex<Vec<ConfirmationRecord>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: Box<dyn CatalogService>,
        confirmer: Box<dyn ConfirmationCollaborator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            catalog,
            confirmer,
            sessions: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
        })
    }

    pub fn sessions(&self) -> MutexGuard<'_, HashMap<String, BookingSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn history(&self) -> MutexGuard<'_, Vec<ConfirmationRecord>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs `f` against the session, or fails with `SessionMissing`.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut BookingSession) -> Result<T, BookingError>,
    ) -> Result<T, BookingError> {
        let mut sessions = self.sessions();
        let session = sessions.get_mut(id).ok_or(BookingError::SessionMissing)?;
        session.touch();
        f(session)
    }

    /// Drops sessions idle for longer than `config.session_ttl` and returns
    /// how many went. A session with a submission in flight is always kept.
    pub fn prune_idle_sessions(&self) -> usize {
        let now = Instant::now();
        let ttl = self.config.session_ttl;
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, s| {
            s.phase() == SubmissionPhase::Submitting
                || now.saturating_duration_since(s.last_touched()) < ttl
        });
        before - sessions.len()
    }
}
