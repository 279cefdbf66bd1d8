//! `/api/auth`: login, token verification and admin account management.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::error::ApiError;
use super::extract::AdminUser;

#[derive(Debug, Default, Deserialize)]
struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAdminBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePasswordBody {
    #[serde(default)]
    current_password: String,
    #[serde(default)]
    new_password: String,
    #[serde(default)]
    confirm_password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
        .route("/logout", post(logout))
        .route("/create-admin", post(create_admin))
        .route("/update-password", put(update_password))
}

async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let session = state.gate.login(&body.email, &body.password).await?;
    Ok(Json(json!({
        "message": "Login successful",
        "token": session.token,
        "user": session.user,
    })))
}

async fn verify(AdminUser(claims): AdminUser) -> Json<Value> {
    Json(json!({ "valid": true, "user": claims.user_info() }))
}

/// Tokens are stateless; the client discards its copy.
async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logout successful" }))
}

async fn create_admin(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    body: Result<Json<CreateAdminBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(body) = body?;
    let user = state
        .gate
        .create_admin(&body.email, &body.password, &body.confirm_password)
        .await?;
    tracing::info!(created_by = claims.sub, user_id = user.id, "admin created over api");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Admin user created successfully", "user": user })),
    ))
}

async fn update_password(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    body: Result<Json<UpdatePasswordBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    state
        .gate
        .update_password(
            claims.sub,
            &body.current_password,
            &body.new_password,
            &body.confirm_password,
        )
        .await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
