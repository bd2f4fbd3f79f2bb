use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use pricetrack_core::categories::{Category, NewCategory};

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories()?;
    Ok(Json(categories))
}

async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(&id)?;
    Ok(Json(category))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let created = state.category_service.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<Json<Category>> {
    let updated = state
        .category_service
        .update_category(Category {
            id,
            name: payload.name,
        })
        .await?;
    Ok(Json(updated))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/categories/{id}", put(update_category))
        .route("/categories/{id}", delete(delete_category))
}
