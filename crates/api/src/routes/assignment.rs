//! Route definitions for the `/assignments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignment;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// POST   /                -> create_assignment (editor)
/// GET    /mine            -> my_assignments (reviewer)
/// GET    /article/{id}    -> article_assignments (editorial staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assignment::create_assignment))
        .route("/mine", get(assignment::my_assignments))
        .route("/article/{id}", get(assignment::article_assignments))
}
