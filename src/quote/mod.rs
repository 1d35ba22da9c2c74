//! Quote domain module
//!
//! Quote model, category allow-list, local fallback table, upstream HTTP
//! client and the provider that ties them together.

pub mod category;
pub mod fallback;
pub mod model;
pub mod provider;
pub mod source;
pub mod upstream;

pub use category::Category;
pub use model::Quote;
pub use provider::QuoteProvider;
pub use source::{QuoteQuery, QuoteSource, UpstreamUnavailable};
pub use upstream::HttpQuoteSource;
