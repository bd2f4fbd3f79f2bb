use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use pricetrack_core::products::{NewProduct, Product};

async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.product_service.get_products()?;
    Ok(Json(products))
}

async fn get_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Product>> {
    let product = state.product_service.get_product(&id)?;
    Ok(Json(product))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let created = state.product_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Json<Product>> {
    let updated = state
        .product_service
        .update_product(Product {
            id,
            name: payload.name,
            category_id: payload.category_id,
        })
        .await?;
    Ok(Json(updated))
}

async fn delete_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.product_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
}

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
}
