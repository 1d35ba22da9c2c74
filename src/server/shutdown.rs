// Graceful shutdown module
// Waits for in-flight connections after the listener is closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::PerformanceConfig;
use crate::logger;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until `conn_counter` reaches zero or the grace period elapses.
///
/// Returns the number of connections still open when it gave up.
pub async fn drain_connections(conn_counter: &AtomicUsize, performance: &PerformanceConfig) -> usize {
    let grace = Duration::from_secs(performance.shutdown_grace_secs);
    logger::log_shutdown_started(conn_counter.load(Ordering::SeqCst), performance.shutdown_grace_secs);

    let deadline = tokio::time::Instant::now() + grace;
    let remaining = loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            break active;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    };

    logger::log_shutdown_complete(remaining);
    remaining
}
