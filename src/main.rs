mod model;
mod server;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::maintenance, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session_store = startup::connect_to_session_store(&db).await?;
    let cors = startup::build_cors(&config)?;

    let state = AppState::new(db, config.cache_ttl, config.payment_window);

    // Start maintenance scheduler
    let scheduler_state = state.clone();
    let scheduler_store = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = maintenance::start_scheduler(scheduler_state, scheduler_store).await {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });

    let app = router::router()
        .with_state(state)
        .layer(startup::session_layer(session_store, &config))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
