//! Handlers for the `/assignments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use quill_core::types::DbId;
use quill_db::repositories::AssignmentRepo;

use crate::engine::ReviewBoard;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireEditor, RequireEditorial, RequireReviewer};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /assignments`.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub article_id: DbId,
    pub reviewer_id: DbId,
}

/// POST /api/v1/assignments
///
/// Assign a reviewer to an article (editor-initiated path). Fails with 409
/// `DUPLICATE_ASSIGNMENT` when the pair already has an active assignment.
pub async fn create_assignment(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateAssignmentRequest>,
) -> AppResult<impl IntoResponse> {
    let assignment = ReviewBoard::create_assignment(
        &state.pool,
        &state.dispatcher,
        input.article_id,
        input.reviewer_id,
        user.user_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// GET /api/v1/assignments/mine
///
/// List the authenticated reviewer's active assignments.
pub async fn my_assignments(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_active_for_reviewer(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse { data: assignments }))
}

/// GET /api/v1/assignments/article/{id}
///
/// List all assignments (active and completed) for an article. Editorial
/// staff only.
pub async fn article_assignments(
    RequireEditorial(_user): RequireEditorial,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignments = AssignmentRepo::list_for_article(&state.pool, article_id).await?;

    Ok(Json(DataResponse { data: assignments }))
}
