use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Remote confirmation endpoint; empty means confirm in-process.
    pub confirmation_url: String,
    pub confirmation_token: String,
    pub confirmation_timeout: Duration,
    /// Sessions untouched for longer than this are dropped.
    pub session_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "turfcricket.db".to_string()),
            confirmation_url: env::var("CONFIRMATION_URL").unwrap_or_default(),
            confirmation_token: env::var("CONFIRMATION_TOKEN").unwrap_or_default(),
            confirmation_timeout: Duration::from_secs(
                env::var("CONFIRMATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            session_ttl: Duration::from_secs(
                env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1800),
            ),
        }
    }
}
