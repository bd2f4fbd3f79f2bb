use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use pricetrack_core::users::{NewUser, Role, User};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest {
    username: String,
    password: String,
    #[serde(default)]
    role: Role,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRoleRequest {
    role: Role,
}

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.get_users()?;
    Ok(Json(users))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&id)?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let password_hash = state
        .auth
        .hash_password(&payload.password)
        .map_err(|e| crate::error::ApiError::Internal(format!("{e:?}")))?;
    let created = state
        .user_service
        .create_user(NewUser {
            id: None,
            username: payload.username,
            password_hash,
            role: payload.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_user_role(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<User>> {
    let updated = state.user_service.update_user_role(id, payload.role).await?;
    Ok(Json(updated))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/role", put(update_user_role))
}
