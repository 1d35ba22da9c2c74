//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, dispatch and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::{assets, pages};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::quote::Quote;

/// Request context encapsulating information needed for routing
pub struct RequestContext<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
}

/// Value of the `category` query parameter; the last occurrence wins
pub fn category_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == "category")
        .map(|(_, value)| value.into_owned())
        .last()
}

/// Routing result: the response plus where its quote came from, if any
pub struct Routed {
    pub response: Response<Full<Bytes>>,
    pub quote_source: Option<&'static str>,
}

impl From<Response<Full<Bytes>>> for Routed {
    fn from(response: Response<Full<Bytes>>) -> Self {
        Self {
            response,
            quote_source: None,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

    let ctx = RequestContext {
        method: req.method().clone(),
        path: req.uri().path(),
        query: req.uri().query(),
        is_head: *req.method() == Method::HEAD,
        if_none_match: header("if-none-match"),
    };

    let Routed {
        mut response,
        quote_source,
    } = route_request(&ctx, &state).await;

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", server);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.referer = header("referer").map(ToString::to_string);
        entry.user_agent = header("user-agent").map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        entry.quote_source = quote_source;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

/// Route request based on method, path and configuration
pub async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Routed {
    // 1. Check HTTP method
    match ctx.method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(state.config.http.enable_cors).into(),
        _ => {
            logger::log_debug(&format!("Method not allowed: {} {}", ctx.method, ctx.path));
            return http::build_405_response().into();
        }
    }

    // 2. Health check endpoints
    let health = &state.config.routes.health;
    if health.enabled && (ctx.path == health.liveness_path || ctx.path == health.readiness_path) {
        return http::build_health_response("ok", ctx.is_head).into();
    }

    // 3. Application routes
    match ctx.path {
        "/" => http::build_html_response(pages::render_index(), ctx.is_head).into(),
        "/quote" => {
            let category = category_param(ctx.query);
            let quote = state.provider.fetch(category.as_deref()).await;
            Routed {
                quote_source: Some(quote_source(&quote)),
                response: http::build_html_response(
                    pages::render_quote(&quote, category.as_deref().unwrap_or("")),
                    ctx.is_head,
                ),
            }
        }
        "/api/quote" => {
            let category = category_param(ctx.query);
            let quote = state.provider.fetch(category.as_deref()).await;
            Routed {
                quote_source: Some(quote_source(&quote)),
                response: http::build_json_response(&quote, ctx.is_head),
            }
        }
        path if path.starts_with(assets::STATIC_PREFIX) => assets::serve(ctx).into(),
        _ => http::build_404_response(ctx.is_head).into(),
    }
}

const fn quote_source(quote: &Quote) -> &'static str {
    if quote.api_error {
        "fallback"
    } else {
        "remote"
    }
}
