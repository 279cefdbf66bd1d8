//! `/api/news`: public reads, admin-only writes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use desk_db::repos::news::{NewsInput, NewsPatch};

use super::AppState;
use super::error::ApiError;
use super::extract::AdminUser;

#[derive(Debug, Default, Deserialize)]
struct NewsListQuery {
    limit: Option<u32>,
    offset: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete))
}

async fn list(
    State(state): State<AppState>,
    query: Result<Query<NewsListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let news = state.service.list_news(query.limit, query.offset).await?;
    Ok(Json(json!({ "news": news })))
}

async fn get_one(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let news = state.service.get_news(id).await?;
    Ok(Json(json!({ "news": news })))
}

async fn create(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    body: Result<Json<NewsInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = body?;
    let news = state.service.create_news(input, Some(claims.sub)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "News item created successfully",
            "news_id": news.news.id,
            "news": news,
        })),
    ))
}

async fn update(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewsPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = body?;
    let news = state.service.update_news(id, patch).await?;
    Ok(Json(json!({ "message": "News item updated successfully", "news": news })))
}

async fn delete(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    state.service.delete_news(id).await?;
    Ok(Json(json!({ "message": "News item deleted successfully" })))
}
