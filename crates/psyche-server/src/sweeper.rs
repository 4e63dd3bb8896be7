//! Background expiry of abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use psyche_core::engine::SessionEngine;

/// Periodically drop sessions idle for longer than `ttl`.
///
/// The task runs until aborted.
pub fn spawn_sweeper(
    engine: Arc<SessionEngine>,
    ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = engine.sweep_expired(ttl);
            if removed > 0 {
                tracing::info!(
                    removed,
                    active = engine.active_sessions(),
                    "expired idle sessions"
                );
            }
        }
    })
}
