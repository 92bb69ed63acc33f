//! Route definitions, one module per resource.

pub mod article;
pub mod assignment;
pub mod health;
pub mod notification;
pub mod review_request;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/articles", article::router())
        .nest("/assignments", assignment::router())
        .nest("/review-requests", review_request::router())
        .nest("/notifications", notification::router())
}
