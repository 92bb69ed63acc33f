//! Handlers for the `/review-requests` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use quill_core::types::DbId;
use quill_db::repositories::ReviewRequestRepo;

use crate::engine::{ReviewBoard, ReviewDecision};
use crate::error::AppResult;
use crate::middleware::rbac::{RequireEditor, RequireReviewer};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /review-requests`.
#[derive(Debug, Deserialize)]
pub struct SendReviewRequestBody {
    pub reviewer_id: DbId,
    /// Optional request-origin article, assigned on acceptance.
    pub article_id: Option<DbId>,
}

/// Request body for `POST /review-requests/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub decision: ReviewDecision,
}

/// POST /api/v1/review-requests
///
/// Send a standing review request to a reviewer. Fails with 409
/// `DUPLICATE_PENDING_REQUEST` when a pending request already exists for
/// the pair.
pub async fn send_review_request(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<SendReviewRequestBody>,
) -> AppResult<impl IntoResponse> {
    let request = ReviewBoard::send_review_request(
        &state.pool,
        &state.dispatcher,
        user.user_id,
        input.reviewer_id,
        input.article_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/review-requests/mine
///
/// List requests addressed to the authenticated reviewer.
pub async fn my_review_requests(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = ReviewRequestRepo::list_for_reviewer(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/review-requests/sent
///
/// List requests sent by the authenticated editor.
pub async fn sent_review_requests(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = ReviewRequestRepo::list_for_editor(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/review-requests/{id}/respond
///
/// Accept or reject a pending review request. A second response fails with
/// 409 `ALREADY_PROCESSED`.
pub async fn respond_to_review_request(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<RespondBody>,
) -> AppResult<impl IntoResponse> {
    let outcome = ReviewBoard::respond_to_review_request(
        &state.pool,
        &state.dispatcher,
        request_id,
        user.user_id,
        input.decision,
    )
    .await?;

    Ok(Json(DataResponse { data: outcome }))
}
