use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use pricetrack_core::marketplaces::{Marketplace, NewMarketplace};

async fn list_marketplaces(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Marketplace>>> {
    let marketplaces = state.marketplace_service.get_marketplaces()?;
    Ok(Json(marketplaces))
}

async fn get_marketplace(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Marketplace>> {
    let marketplace = state.marketplace_service.get_marketplace(&id)?;
    Ok(Json(marketplace))
}

async fn create_marketplace(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMarketplace>,
) -> ApiResult<(StatusCode, Json<Marketplace>)> {
    let created = state.marketplace_service.create_marketplace(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_marketplace(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMarketplace>,
) -> ApiResult<Json<Marketplace>> {
    let updated = state
        .marketplace_service
        .update_marketplace(Marketplace {
            id,
            name: payload.name,
        })
        .await?;
    Ok(Json(updated))
}

async fn delete_marketplace(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.marketplace_service.delete_marketplace(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/marketplaces", get(list_marketplaces))
        .route("/marketplaces/{id}", get(get_marketplace))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/marketplaces", post(create_marketplace))
        .route("/marketplaces/{id}", put(update_marketplace))
        .route("/marketplaces/{id}", delete(delete_marketplace))
}
