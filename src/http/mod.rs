//! HTTP protocol layer module
//!
//! Response builders, caching headers and MIME lookup, decoupled from the
//! quote-specific request handling.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_cached_response,
    build_health_response, build_html_response, build_json_response, build_options_response,
};
