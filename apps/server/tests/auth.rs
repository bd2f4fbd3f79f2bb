use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use pricetrack_server::{api::app_router, build_state, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

async fn build_test_router() -> (TempDir, axum::Router) {
    let tmp = tempfile::tempdir().unwrap();
    std::env::set_var("PT_DB_PATH", tmp.path().join("test.db"));
    // Not valid base64; the raw 32-byte fallback applies.
    std::env::set_var("PT_JWT_SECRET", "integration_test_secret_32_bytes");
    std::env::set_var("PT_ADMIN_USERNAME", "admin");
    std::env::set_var("PT_ADMIN_PASSWORD", "super-secret");

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

fn cleanup_env() {
    for key in [
        "PT_DB_PATH",
        "PT_JWT_SECRET",
        "PT_ADMIN_USERNAME",
        "PT_ADMIN_PASSWORD",
    ] {
        std::env::remove_var(key);
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &axum::Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let json = json_body(response).await;
    json["accessToken"].as_str().unwrap().to_string()
}

// Env vars are process-global, so the whole flow lives in one test.
#[tokio::test]
async fn login_roles_and_protected_routes() {
    let (_tmp, app) = build_test_router().await;

    // No token: protected route rejects.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Wrong password rejects.
    let bad_login = serde_json::json!({ "username": "admin", "password": "nope" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bad_login.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Bootstrapped admin can log in and read.
    let admin_token = login(&app, "admin", "super-secret").await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/products")
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Admin can create reference data.
    let new_product = serde_json::json!({ "name": "milk" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/products")
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(new_product.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    // Admin creates a regular user.
    let new_user = serde_json::json!({
        "username": "bob",
        "password": "bob-password",
        "role": "USER"
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/users")
                .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(new_user.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created = json_body(response).await;
    assert_eq!(created["role"], "USER");
    assert!(created.get("passwordHash").is_none());

    // Regular user can read but not mutate reference data.
    let user_token = login(&app, "bob", "bob-password").await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/products")
                .header(header::AUTHORIZATION, format!("Bearer {user_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let another_product = serde_json::json!({ "name": "bread" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/products")
                .header(header::AUTHORIZATION, format!("Bearer {user_token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(another_product.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    cleanup_env();
}
