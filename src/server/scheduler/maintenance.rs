use chrono::{DateTime, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    error::AppError,
    service::{booking::BookingService, trip::TripService},
    state::AppState,
};

/// Starts the maintenance scheduler.
///
/// Every minute the job:
/// - Moves trips to `ongoing` or `completed` based on their dates
/// - Expires bookings whose payment window has closed, refunding wallet shares
/// - Drops expired cache entries
/// - Deletes expired sessions
///
/// Each task logs its own failure and never stops the others.
///
/// # Arguments
/// - `state`: Shared application state (database, caches, payment window)
/// - `session_store`: Session store to sweep
pub async fn start_scheduler(state: AppState, session_store: SqliteStore) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = state.clone();
        let session_store = session_store.clone();

        Box::pin(async move {
            run_maintenance(&state, Utc::now()).await;

            if let Err(e) = session_store.delete_expired().await {
                tracing::error!("Error deleting expired sessions: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Runs one maintenance pass over trips, bookings and caches.
pub async fn run_maintenance(state: &AppState, now: DateTime<Utc>) {
    match TripService::new(&state.db, &state.trip_cache)
        .apply_status_transitions(now.date_naive())
        .await
    {
        Ok(transitions) if transitions.started + transitions.completed > 0 => {
            tracing::info!(
                "Trip status updated: {} started, {} completed",
                transitions.started,
                transitions.completed
            );
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Error applying trip status transitions: {}", e),
    }

    match BookingService::new(&state.db, state.payment_window)
        .expire_overdue(now)
        .await
    {
        Ok(0) => {}
        Ok(expired) => tracing::info!("Expired {} unpaid bookings", expired),
        Err(e) => tracing::error!("Error expiring overdue bookings: {}", e),
    }

    let purged =
        state.trip_cache.purge_expired().await + state.profile_cache.purge_expired().await;
    if purged > 0 {
        tracing::debug!("Purged {} expired cache entries", purged);
    }
}
