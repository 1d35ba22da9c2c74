//! Request handler module
//!
//! Routes requests to the landing page, the quote page, the JSON quote
//! endpoint, health probes and the embedded front-end assets.

pub mod assets;
pub mod pages;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
