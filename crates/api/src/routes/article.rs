//! Route definitions for the `/articles` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::article;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// POST   /                    -> create_article (author)
/// GET    /                    -> list_articles
/// GET    /{id}                -> get_article
/// POST   /{id}/transitions    -> transition_article
/// GET    /{id}/workflow-log   -> get_workflow_log (editorial staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(article::create_article).get(article::list_articles))
        .route("/{id}", get(article::get_article))
        .route("/{id}/transitions", post(article::transition_article))
        .route("/{id}/workflow-log", get(article::get_workflow_log))
}
