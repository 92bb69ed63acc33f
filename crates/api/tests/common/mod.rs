//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! against the test database pool, seeds users through the repository
//! layer, and mints real access tokens so requests exercise the full
//! auth path.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use quill_api::auth::jwt::{generate_access_token, JwtConfig};
use quill_api::config::ServerConfig;
use quill_api::router::build_app_router;
use quill_api::state::AppState;
use quill_core::roles::Role;
use quill_db::models::article::CreateArticle;
use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::{ArticleRepo, UserRepo};
use quill_events::{EventBus, NotificationDispatcher};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let dispatcher = Arc::new(NotificationDispatcher::new(
        pool.clone(),
        Arc::clone(&event_bus),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        dispatcher,
    };

    build_app_router(state, &config)
}

/// Seed a user with the given role and return the stored row.
pub async fn seed_user(pool: &PgPool, name: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            role,
        },
    )
    .await
    .expect("failed to seed user")
}

/// Seed a draft article owned by `author` and return its id.
pub async fn seed_article(pool: &PgPool, author: &User, title: &str) -> i64 {
    ArticleRepo::create(
        pool,
        author.id,
        &CreateArticle {
            title: title.to_string(),
            content: "A manuscript body.".to_string(),
        },
    )
    .await
    .expect("failed to seed article")
    .id
}

/// Mint a real access token for a seeded user.
pub fn token_for(user: &User) -> String {
    let role: Role = user.role.parse().expect("seeded user has a valid role");
    generate_access_token(user.id, role, &test_config().jwt).expect("failed to mint token")
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET with a bearer token.
pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// POST a JSON body with a bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with no body (read-marking endpoints).
pub async fn post_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("response body is not JSON: {e}"))
}

/// Assert a response carries the expected status and error `code`.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}
