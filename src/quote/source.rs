//! Upstream quote source abstraction

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::category::Category;
use super::model::Quote;

/// Reasons the upstream source could not produce a quote
///
/// All variants lead to the same recovery path (fallback selection).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamUnavailable {
    #[error("network error: {0}")]
    Network(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Parameters for one random-quote request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    pub tag: Option<Category>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
}

impl QuoteQuery {
    /// Query filtered by an optional user-supplied category
    pub fn for_category(category: Option<&str>) -> Self {
        Self {
            tag: Category::resolve(category),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_lengths(mut self, min_length: Option<u32>, max_length: Option<u32>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Upstream query parameters, in wire order. Empty when unfiltered.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(tag) = self.tag {
            params.push(("tags", tag.as_tag().to_string()));
        }
        if let Some(min) = self.min_length {
            params.push(("minLength", min.to_string()));
        }
        if let Some(max) = self.max_length {
            params.push(("maxLength", max.to_string()));
        }
        params
    }
}

/// Something that can produce a random quote from a remote service
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn random_quote(&self, query: &QuoteQuery) -> Result<Quote, UpstreamUnavailable>;
}
