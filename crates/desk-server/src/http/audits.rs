//! `/api/audits`: listing, upload, deletion and the stats overview.

use axum::extract::multipart::Field;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};

use desk_core::responses::StatsOverview;
use desk_db::files::UploadedFile;
use desk_db::repos::audit::{AuditQuery, AuditUpload};

use super::AppState;
use super::error::ApiError;
use super::extract::AdminUser;

/// Multipart framing and the text fields ride on top of the file itself.
const MULTIPART_SLACK_BYTES: usize = 1024 * 1024;

pub fn routes(max_file_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_file_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_SLACK_BYTES);

    Router::new()
        .route("/", get(list))
        .route("/stats/overview", get(stats_overview))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/:id", get(get_one).delete(delete))
}

async fn list(
    State(state): State<AppState>,
    query: Result<Query<AuditQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let page = state.service.list_audits(&query).await?;
    Ok(Json(json!({
        "audits": page.items,
        "total": page.total,
        "limit": page.limit,
        "offset": page.offset,
    })))
}

async fn get_one(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let audit = state.service.get_audit(id).await?;
    Ok(Json(json!({ "audit": audit })))
}

async fn stats_overview(State(state): State<AppState>) -> Result<Json<StatsOverview>, ApiError> {
    Ok(Json(state.service.stats_overview(Utc::now()).await?))
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    Ok(field.text().await?)
}

async fn read_upload(mut multipart: Multipart) -> Result<AuditUpload, ApiError> {
    let mut upload = AuditUpload::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await?.to_vec();
                upload.file = Some(UploadedFile {
                    original_name,
                    content_type,
                    bytes,
                });
            }
            "company_id" => upload.company_id = read_text(field).await?,
            "audit_date" => upload.audit_date = read_text(field).await?,
            "branch_number" => upload.branch_number = read_text(field).await?,
            "description" => upload.description = Some(read_text(field).await?),
            "status" => upload.status = read_text(field).await?,
            other => tracing::debug!(field = other, "ignoring unknown upload field"),
        }
    }
    Ok(upload)
}

async fn upload(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let upload = read_upload(multipart?).await?;
    let audit = state.service.upload_audit(upload, Some(claims.sub)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Audit uploaded successfully",
            "audit_id": audit.audit.id,
            "audit": audit,
        })),
    ))
}

async fn delete(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    state.service.delete_audit(id).await?;
    Ok(Json(json!({ "message": "Audit deleted successfully" })))
}
