use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_requires_post() {
    let app = create_test_app();
    // GET sobre una ruta POST no debe dar 500
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_login_endpoint_accepts_json() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "email": "admin@frota.com",
                        "password": "secret123"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// Función helper para crear la app de test
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(json!({ "service": "fleet-management", "status": "healthy" })) }),
        )
        .route("/api/auth/login", post(|| async { Json(json!({ "success": true })) }))
}
