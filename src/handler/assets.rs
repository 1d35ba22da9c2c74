//! Embedded static assets
//!
//! The front-end script and stylesheet are compiled into the binary and
//! served under `/static/` with `ETag` revalidation.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::OnceLock;

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, CachePolicy};

/// URL prefix for embedded assets
pub const STATIC_PREFIX: &str = "/static/";

const ASSET_CACHE: CachePolicy = CachePolicy::Public(3600);

const SOURCES: [(&str, &str); 2] = [
    ("js/app.js", include_str!("../../static/js/app.js")),
    ("css/style.css", include_str!("../../static/css/style.css")),
];

/// One embedded file with its precomputed headers
struct Asset {
    path: &'static str,
    data: Bytes,
    content_type: &'static str,
    etag: String,
}

fn assets() -> &'static [Asset] {
    static ASSETS: OnceLock<Vec<Asset>> = OnceLock::new();
    ASSETS.get_or_init(|| {
        SOURCES
            .iter()
            .map(|&(path, text)| Asset {
                path,
                data: Bytes::from_static(text.as_bytes()),
                content_type: mime::content_type_for_path(path),
                etag: cache::generate_etag(text.as_bytes()),
            })
            .collect()
    })
}

/// Serve `/static/<relative>`; unknown assets are 404
pub fn serve(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let Some(relative) = ctx.path.strip_prefix(STATIC_PREFIX) else {
        return http::build_404_response(ctx.is_head);
    };
    let Some(asset) = assets().iter().find(|a| a.path == relative) else {
        return http::build_404_response(ctx.is_head);
    };

    if cache::check_etag_match(ctx.if_none_match, &asset.etag) {
        return http::build_304_response(&asset.etag, ASSET_CACHE);
    }

    http::build_cached_response(
        asset.data.clone(),
        asset.content_type,
        &asset.etag,
        ASSET_CACHE,
        ctx.is_head,
    )
}
