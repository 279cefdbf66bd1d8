//! JSON API under `/api`.
//!
//! Reads are public. Every mutation goes through the [`extract::AdminUser`]
//! bearer extractor before the handler body runs.

mod audits;
mod auth;
mod companies;
mod error;
mod extract;
mod health;
mod layers;
mod news;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::context::AppContext;

pub type AppState = Arc<AppContext>;

/// Build the full application.
///
/// # Errors
///
/// Fails when `server.frontend_origin` is not a valid header value.
pub fn router(state: AppState) -> anyhow::Result<Router> {
    let max_file_bytes = state.service.files().max_file_bytes();
    let cors = layers::cors(&state.config.server.frontend_origin)?;

    let api = Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth::routes())
        .nest("/companies", companies::routes())
        .nest("/audits", audits::routes(max_file_bytes))
        .nest("/news", news::routes());

    let app = Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(cors)
        .with_state(state);
    Ok(layers::harden(app))
}

async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}
