//! Quote retrieval with local fallback
//!
//! One upstream attempt per call. Whatever goes wrong (network, timeout,
//! status, payload) resolves to a random fallback quote flagged with
//! `api_error`, so callers always get a `Quote`.

use std::sync::Arc;

use super::fallback;
use super::model::Quote;
use super::source::{QuoteQuery, QuoteSource};
use crate::logger;

/// Resolves quotes from an upstream source, substituting fallbacks on failure
#[derive(Clone)]
pub struct QuoteProvider {
    source: Arc<dyn QuoteSource>,
    min_length: Option<u32>,
    max_length: Option<u32>,
}

impl QuoteProvider {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self {
            source,
            min_length: None,
            max_length: None,
        }
    }

    /// Length bounds sent with every upstream request
    #[must_use]
    pub const fn with_length_bounds(mut self, min_length: Option<u32>, max_length: Option<u32>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Upstream query for an optional, case-insensitive category
    pub fn query_for(&self, category: Option<&str>) -> QuoteQuery {
        QuoteQuery::for_category(category).with_lengths(self.min_length, self.max_length)
    }

    /// Fetch a random quote for an optional, case-insensitive category
    pub async fn fetch(&self, category: Option<&str>) -> Quote {
        let query = self.query_for(category);
        match self.source.random_quote(&query).await {
            Ok(mut quote) => {
                quote.api_error = false;
                quote
            }
            Err(reason) => {
                logger::log_warning(&format!(
                    "Quote service unavailable ({reason}), serving fallback quote"
                ));
                fallback::random_fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::fallback::FALLBACK_QUOTES;
    use crate::quote::source::UpstreamUnavailable;
    use crate::quote::Category;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every query and answers with a fixed result
    struct RecordingSource {
        calls: Mutex<Vec<QuoteQuery>>,
        result: Result<Quote, UpstreamUnavailable>,
    }

    impl RecordingSource {
        fn new(result: Result<Quote, UpstreamUnavailable>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                result,
            })
        }

        fn calls(&self) -> Vec<QuoteQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuoteSource for RecordingSource {
        async fn random_quote(&self, query: &QuoteQuery) -> Result<Quote, UpstreamUnavailable> {
            self.calls.lock().unwrap().push(query.clone());
            self.result.clone()
        }
    }

    fn remote_quote() -> Quote {
        Quote::from_payload(
            r#"{"_id":"r1","content":"Simplicity is the ultimate sophistication.","author":"Leonardo da Vinci","tags":["wisdom"]}"#,
        )
        .unwrap()
    }

    fn is_fallback(quote: &Quote) -> bool {
        quote.api_error
            && FALLBACK_QUOTES
                .iter()
                .any(|f| f.content == quote.content && f.author == quote.author)
    }

    #[tokio::test]
    async fn test_success_passes_payload_through() {
        let source = RecordingSource::new(Ok(remote_quote()));
        let provider = QuoteProvider::new(source.clone());

        let quote = provider.fetch(Some("wisdom")).await;

        assert_eq!(quote, remote_quote());
        assert!(serde_json::to_value(&quote).unwrap().get("api_error").is_none());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_tag_mapping_for_allow_list() {
        for category in Category::ALL {
            let source = RecordingSource::new(Ok(remote_quote()));
            let provider = QuoteProvider::new(source.clone());
            provider.fetch(Some(category.as_tag())).await;
            assert_eq!(source.calls()[0].tag, Some(category));
        }
    }

    #[tokio::test]
    async fn test_mixed_case_category() {
        let source = RecordingSource::new(Ok(remote_quote()));
        let provider = QuoteProvider::new(source.clone());

        provider.fetch(Some("Wisdom")).await;

        assert_eq!(
            source.calls()[0].to_params(),
            vec![("tags", "wisdom".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_category_has_no_params() {
        for input in [Some("unknown-category"), Some(""), None] {
            let source = RecordingSource::new(Ok(remote_quote()));
            let provider = QuoteProvider::new(source.clone());
            provider.fetch(input).await;
            let calls = source.calls();
            assert_eq!(calls.len(), 1);
            assert!(calls[0].to_params().is_empty());
        }
    }

    #[tokio::test]
    async fn test_business_timeout_falls_back() {
        let source = RecordingSource::new(Err(UpstreamUnavailable::Timeout(Duration::from_secs(5))));
        let provider = QuoteProvider::new(source.clone());

        let quote = provider.fetch(Some("business")).await;

        assert_eq!(source.calls()[0].tag, Some(Category::Business));
        assert!(quote.api_error);
        assert!(quote.author == "Steve Jobs" || quote.author == "Winston Churchill");
    }

    #[tokio::test]
    async fn test_every_failure_kind_falls_back() {
        let failures = [
            UpstreamUnavailable::Network("connection refused".to_string()),
            UpstreamUnavailable::Timeout(Duration::from_secs(5)),
            UpstreamUnavailable::Status(500),
            UpstreamUnavailable::Status(429),
            UpstreamUnavailable::Malformed("expected value".to_string()),
        ];
        for failure in failures {
            let source = RecordingSource::new(Err(failure));
            let provider = QuoteProvider::new(source.clone());
            let quote = provider.fetch(None).await;
            assert!(is_fallback(&quote));
            // no retries
            assert_eq!(source.calls().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_fallback_selection_covers_all_entries() {
        let source = RecordingSource::new(Err(UpstreamUnavailable::Status(503)));
        let provider = QuoteProvider::new(source);

        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(provider.fetch(None).await.content);
            if seen.len() == FALLBACK_QUOTES.len() {
                break;
            }
        }
        assert_eq!(seen.len(), FALLBACK_QUOTES.len());
    }

    #[tokio::test]
    async fn test_length_bounds_are_forwarded() {
        let source = RecordingSource::new(Ok(remote_quote()));
        let provider = QuoteProvider::new(source.clone()).with_length_bounds(Some(10), Some(90));

        provider.fetch(Some("life")).await;

        assert_eq!(
            source.calls()[0].to_params(),
            vec![
                ("tags", "life".to_string()),
                ("minLength", "10".to_string()),
                ("maxLength", "90".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_remote_api_error_flag_is_cleared() {
        let mut tampered = remote_quote();
        tampered.api_error = true;
        let provider = QuoteProvider::new(RecordingSource::new(Ok(tampered)));

        let quote = provider.fetch(None).await;
        assert!(!quote.api_error);
        assert!(serde_json::to_value(&quote).unwrap().get("api_error").is_none());
    }

    #[tokio::test]
    async fn test_sparse_payloads_are_returned_exactly() {
        let payloads = [
            serde_json::json!({"author": "Anon", "content": "Hi"}),
            serde_json::json!({"author": "Anon", "content": "Hi", "tags": null}),
            serde_json::json!({"author": "Anon", "content": "Hi", "api_error": false}),
        ];
        for payload in payloads {
            let remote = Quote::from_payload(&payload.to_string()).unwrap();
            let provider = QuoteProvider::new(RecordingSource::new(Ok(remote)));

            let quote = provider.fetch(Some("life")).await;
            assert!(!quote.api_error);
            assert_eq!(serde_json::to_value(&quote).unwrap(), payload);
        }
    }
}
