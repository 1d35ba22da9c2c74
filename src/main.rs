use clap::Parser;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod quote;
mod server;

use quote::{HttpQuoteSource, QuoteProvider};

/// QuoteWise: inspirational quotes by category, with a local fallback
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (extension optional; missing file means defaults)
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut cfg = config::Config::load_from(&args.config)?;
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    logger::init(&cfg)?;

    // Size the Tokio runtime from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let source = HttpQuoteSource::from_config(&cfg.upstream)?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    logger::log_info(&format!("Quote upstream: {}", source.endpoint()));

    let provider = QuoteProvider::new(Arc::new(source))
        .with_length_bounds(cfg.upstream.min_length, cfg.upstream.max_length);
    let state = Arc::new(config::AppState::new(cfg, provider));
    server::start_signal_handler(Arc::clone(&state))?;

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state))
        .await?;

    logger::log_info("Server stopped");
    Ok(())
}
