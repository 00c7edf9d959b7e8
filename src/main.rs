use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use turfcricket::config::AppConfig;
use turfcricket::db;
use turfcricket::handlers;
use turfcricket::services::catalog::sqlite::SqliteCatalog;
use turfcricket::services::confirmation::http::HttpConfirmationGateway;
use turfcricket::services::confirmation::local::LocalConfirmationDesk;
use turfcricket::services::confirmation::ConfirmationCollaborator;
use turfcricket::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = Arc::new(Mutex::new(db::init_db(&config.database_url)?));

    let confirmer: Box<dyn ConfirmationCollaborator> = if config.confirmation_url.is_empty() {
        tracing::info!("no CONFIRMATION_URL set, confirming bookings locally");
        Box::new(LocalConfirmationDesk::new(Arc::clone(&conn)))
    } else {
        tracing::info!(
            url = %config.confirmation_url,
            timeout_secs = config.confirmation_timeout.as_secs(),
            "using remote confirmation service"
        );
        Box::new(HttpConfirmationGateway::new(
            config.confirmation_url.clone(),
            config.confirmation_token.clone(),
            config.confirmation_timeout,
        )?)
    };

    let state = AppState::new(
        config.clone(),
        Box::new(SqliteCatalog::new(Arc::clone(&conn))),
        confirmer,
    );

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
