//! `/api/companies`: read-only company summaries and per-company audits.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Default, Deserialize)]
struct CompanyAuditsQuery {
    status: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/name/:name", get(by_name))
        .route("/:id", get(by_id))
        .route("/:id/audits", get(audits))
}

async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let companies = state.service.list_companies().await?;
    Ok(Json(json!({ "companies": companies })))
}

async fn by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let company = state.service.get_company(id).await?;
    Ok(Json(json!({ "company": company })))
}

async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let company = state.service.get_company_by_name(&name).await?;
    Ok(Json(json!({ "company": company })))
}

async fn audits(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<CompanyAuditsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let audits = state
        .service
        .company_audits(id, query.status.as_deref(), query.limit, query.offset)
        .await?;
    Ok(Json(json!({ "audits": audits })))
}
