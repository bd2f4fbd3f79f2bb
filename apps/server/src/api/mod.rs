use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth, config::Config, main_lib::AppState};

pub mod categories;
pub mod health;
pub mod listings;
pub mod marketplaces;
pub mod products;
pub mod users;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    // Reference-data mutations and user management are admin-only.
    let admin = Router::new()
        .merge(categories::admin_router())
        .merge(products::admin_router())
        .merge(marketplaces::admin_router())
        .merge(users::router())
        .route_layer(middleware::from_fn(auth::require_admin));

    let protected = Router::new()
        .merge(categories::router())
        .merge(products::router())
        .merge(marketplaces::router())
        .merge(listings::router())
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_jwt,
        ));

    let api = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/auth/login", post(auth::login))
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
