//! HTTP client for the Quotable API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use super::model::Quote;
use super::source::{QuoteQuery, QuoteSource, UpstreamUnavailable};
use crate::config::UpstreamConfig;

const RANDOM_PATH: &str = "random";

/// `QuoteSource` backed by a remote REST endpoint
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpQuoteSource {
    /// Build a client for `{base_url}/random` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, String> {
        let mut base = Url::parse(base_url).map_err(|e| format!("Invalid upstream URL '{base_url}': {e}"))?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let endpoint = base
            .join(RANDOM_PATH)
            .map_err(|e| format!("Invalid upstream URL '{base_url}': {e}"))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, String> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify(&self, err: &reqwest::Error) -> UpstreamUnavailable {
        if err.is_timeout() {
            UpstreamUnavailable::Timeout(self.timeout)
        } else if err.is_decode() {
            UpstreamUnavailable::Malformed(err.to_string())
        } else {
            UpstreamUnavailable::Network(err.to_string())
        }
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn random_quote(&self, query: &QuoteQuery) -> Result<Quote, UpstreamUnavailable> {
        let params = query.to_params();
        let mut request = self.client.get(self.endpoint.clone());
        if !params.is_empty() {
            request = request.query(&params);
        }
        let response = request.send().await.map_err(|e| self.classify(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamUnavailable::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(&e))?;
        Quote::from_payload(&body).map_err(UpstreamUnavailable::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Request, Response};
    use hyper_util::rt::TokioIo;
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    /// Canned reply served by the in-process stub
    #[derive(Clone)]
    struct StubReply {
        status: u16,
        body: String,
        delay: Duration,
    }

    impl StubReply {
        fn ok(body: &str) -> Self {
            Self {
                status: 200,
                body: body.to_string(),
                delay: Duration::ZERO,
            }
        }
    }

    /// Start a one-route HTTP stub. Returns its address and the recorded
    /// `path?query` of every request it received.
    async fn spawn_stub(reply: StubReply) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let reply = reply.clone();
                let seen = Arc::clone(&seen_clone);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                        let reply = reply.clone();
                        let seen = Arc::clone(&seen);
                        async move {
                            let target = req
                                .uri()
                                .path_and_query()
                                .map(ToString::to_string)
                                .unwrap_or_default();
                            seen.lock().unwrap().push(target);
                            tokio::time::sleep(reply.delay).await;
                            let resp = Response::builder()
                                .status(reply.status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(reply.body)))
                                .unwrap();
                            Ok::<_, Infallible>(resp)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        (addr, seen)
    }

    fn source_for(addr: SocketAddr, timeout: Duration) -> HttpQuoteSource {
        HttpQuoteSource::new(&format!("http://{addr}"), timeout, "quotewise-test").unwrap()
    }

    const PAYLOAD: &str = r#"{"_id":"q1","content":"Well done is better than well said.","author":"Benjamin Franklin","tags":["wisdom"],"authorSlug":"benjamin-franklin","length":35}"#;

    #[test]
    fn test_endpoint_join() {
        let source = HttpQuoteSource::new("http://api.quotable.io", Duration::from_secs(5), "ua").unwrap();
        assert_eq!(source.endpoint().as_str(), "http://api.quotable.io/random");

        let source = HttpQuoteSource::new("http://localhost:9000/v1", Duration::from_secs(5), "ua").unwrap();
        assert_eq!(source.endpoint().as_str(), "http://localhost:9000/v1/random");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpQuoteSource::new("not a url", Duration::from_secs(5), "ua").is_err());
    }

    #[tokio::test]
    async fn test_success_returns_payload() {
        let (addr, seen) = spawn_stub(StubReply::ok(PAYLOAD)).await;
        let source = source_for(addr, Duration::from_secs(5));

        let query = QuoteQuery::for_category(Some("wisdom"));
        let quote = source.random_quote(&query).await.unwrap();

        assert_eq!(quote.author, "Benjamin Franklin");
        assert!(!quote.api_error);
        let expected: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(serde_json::to_value(&quote).unwrap(), expected);
        assert_eq!(seen.lock().unwrap().as_slice(), ["/random?tags=wisdom"]);
    }

    #[tokio::test]
    async fn test_unfiltered_request_has_no_query() {
        let (addr, seen) = spawn_stub(StubReply::ok(PAYLOAD)).await;
        let source = source_for(addr, Duration::from_secs(5));

        source
            .random_quote(&QuoteQuery::for_category(Some("unknown-category")))
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), ["/random"]);
    }

    #[tokio::test]
    async fn test_length_params_forwarded() {
        let (addr, seen) = spawn_stub(StubReply::ok(PAYLOAD)).await;
        let source = source_for(addr, Duration::from_secs(5));

        let query = QuoteQuery::for_category(None).with_lengths(Some(20), Some(100));
        source.random_quote(&query).await.unwrap();

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["/random?minLength=20&maxLength=100"]
        );
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let reply = StubReply {
            status: 500,
            body: r#"{"error":"boom"}"#.to_string(),
            delay: Duration::ZERO,
        };
        let (addr, _) = spawn_stub(reply).await;
        let source = source_for(addr, Duration::from_secs(5));

        let err = source.random_quote(&QuoteQuery::default()).await.unwrap_err();
        assert_eq!(err, UpstreamUnavailable::Status(500));
    }

    #[tokio::test]
    async fn test_non_200_success_is_failure() {
        let reply = StubReply {
            status: 204,
            body: String::new(),
            delay: Duration::ZERO,
        };
        let (addr, _) = spawn_stub(reply).await;
        let source = source_for(addr, Duration::from_secs(5));

        let err = source.random_quote(&QuoteQuery::default()).await.unwrap_err();
        assert_eq!(err, UpstreamUnavailable::Status(204));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (addr, _) = spawn_stub(StubReply::ok("<html>oops</html>")).await;
        let source = source_for(addr, Duration::from_secs(5));

        let err = source.random_quote(&QuoteQuery::default()).await.unwrap_err();
        assert!(matches!(err, UpstreamUnavailable::Malformed(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let reply = StubReply {
            delay: Duration::from_secs(2),
            ..StubReply::ok(PAYLOAD)
        };
        let (addr, _) = spawn_stub(reply).await;
        let timeout = Duration::from_millis(200);
        let source = source_for(addr, timeout);

        let err = source.random_quote(&QuoteQuery::default()).await.unwrap_err();
        assert_eq!(err, UpstreamUnavailable::Timeout(timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let source = source_for(addr, Duration::from_secs(5));

        let err = source.random_quote(&QuoteQuery::default()).await.unwrap_err();
        assert!(matches!(err, UpstreamUnavailable::Network(_)));
    }
}
