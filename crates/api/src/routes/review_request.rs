//! Route definitions for the `/review-requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review_request;
use crate::state::AppState;

/// Routes mounted at `/review-requests`.
///
/// ```text
/// POST   /                -> send_review_request (editor)
/// GET    /mine            -> my_review_requests (reviewer)
/// GET    /sent            -> sent_review_requests (editor)
/// POST   /{id}/respond    -> respond_to_review_request (reviewer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(review_request::send_review_request))
        .route("/mine", get(review_request::my_review_requests))
        .route("/sent", get(review_request::sent_review_requests))
        .route(
            "/{id}/respond",
            post(review_request::respond_to_review_request),
        )
}
