use {
    crate::{
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    std::{
        sync::{
            atomic::Ordering,
            Arc,
        },
        time::Duration,
    },
};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Drops expired sessions until the server shuts down.
pub async fn run_session_sweeper(store: Arc<Store>) -> anyhow::Result<()> {
    tracing::info!("Starting session sweeper...");
    let mut sweep_interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);

    while !SHOULD_EXIT.load(Ordering::Acquire) {
        tokio::select! {
            _ = sweep_interval.tick() => {
                store.session_service.remove_expired_sessions();
            }
            _ = exit_check_interval.tick() => {}
        }
    }
    tracing::info!("Shutting down session sweeper...");
    Ok(())
}
