// Application state module
// Shared, read-only per-process state handed to every request

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::quote::QuoteProvider;

/// Application state
pub struct AppState {
    pub config: Config,
    pub provider: QuoteProvider,
    /// Fired once when the process should stop accepting connections
    pub shutdown_signal: Arc<Notify>,
    shutdown_requested: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, provider: QuoteProvider) -> Self {
        Self {
            config,
            provider,
            shutdown_signal: Arc::new(Notify::new()),
            shutdown_requested: AtomicBool::new(false),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown_signal.notify_waiters();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}
