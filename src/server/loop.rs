// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::shutdown::drain_connections;
use crate::config;
use crate::logger;

/// Accept connections until `AppState::request_shutdown` fires, then stop
/// accepting and wait for in-flight connections within the grace period.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    let shutdown = state.shutdown_signal.notified();
    tokio::pin!(shutdown);
    // Register before the first poll so a signal raised early is not lost
    shutdown.as_mut().enable();

    loop {
        if state.is_shutting_down() {
            break;
        }
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                break;
            }
        }
    }

    // Stop accepting before waiting on in-flight requests
    drop(listener);
    drain_connections(&active_connections, &state.config.performance).await;
    Ok(())
}
