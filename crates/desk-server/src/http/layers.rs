//! Cross-origin access for the dashboard and response hardening headers.

use anyhow::Context;
use axum::Router;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Allow `frontend_origin`, and only it, to call the API with credentials.
pub fn cors(frontend_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_origin.trim())
        .with_context(|| format!("invalid server.frontend_origin '{frontend_origin}'"))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

/// Attach the static security headers to every response that lacks them.
pub fn harden(router: Router) -> Router {
    [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::REFERRER_POLICY, "no-referrer"),
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=15552000; includeSubDomains",
        ),
        (
            header::CONTENT_SECURITY_POLICY,
            "default-src 'none'; frame-ancestors 'none'",
        ),
    ]
    .into_iter()
    .fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ))
    })
}
