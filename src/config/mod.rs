// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, PerformanceConfig, UpstreamConfig};

/// Environment variable prefix, e.g. `QUOTEWISE_UPSTREAM__TIMEOUT_SECS`
const ENV_PREFIX: &str = "QUOTEWISE";

const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// A missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate().map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace_secs", 10)?
            .set_default("http.server_name", "QuoteWise/1.0")?
            .set_default("http.enable_cors", false)?
            .set_default("upstream.base_url", "http://api.quotable.io")?
            .set_default("upstream.timeout_secs", 5)?
            .set_default(
                "upstream.user_agent",
                concat!("quotewise/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Reject settings that would make the service misbehave at runtime
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream.timeout_secs == 0 {
            return Err("upstream.timeout_secs must be greater than 0".to_string());
        }
        if let Err(e) = url::Url::parse(&self.upstream.base_url) {
            return Err(format!(
                "upstream.base_url '{}' is not a valid URL: {e}",
                self.upstream.base_url
            ));
        }
        if let (Some(min), Some(max)) = (self.upstream.min_length, self.upstream.max_length) {
            if min > max {
                return Err(format!(
                    "upstream.min_length ({min}) is greater than upstream.max_length ({max})"
                ));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "logging.level '{}' must be one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config::defaults()
        .and_then(|builder| builder.build())
        .and_then(config::Config::try_deserialize)
        .expect("default configuration must deserialize")
}
