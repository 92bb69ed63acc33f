//! Handlers for the `/articles` resource, including lifecycle transitions
//! and the workflow audit trail.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_core::workflow::{ArticleStatus, WorkflowAction};
use quill_db::models::article::CreateArticle;
use quill_db::repositories::{ArticleRepo, WorkflowLogRepo};

use crate::engine::{LifecycleEngine, TransitionCommand};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireAuthor, RequireEditorial};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for article listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for article listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /articles`.
#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    /// Filter by lifecycle status.
    pub status: Option<String>,
    /// Filter by authoring user.
    pub author_id: Option<DbId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Request body for `POST /articles/{id}/transitions`.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub action: WorkflowAction,
    pub target_user_id: Option<DbId>,
    pub comments: Option<String>,
}

// ---------------------------------------------------------------------------
// Article CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/articles
///
/// Create a new draft manuscript owned by the authenticated author.
pub async fn create_article(
    RequireAuthor(user): RequireAuthor,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|err| CoreError::Validation(err.to_string()))?;

    let article = ArticleRepo::create(&state.pool, user.user_id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// GET /api/v1/articles/{id}
pub async fn get_article(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::find_by_id(&state.pool, article_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Article",
            id: article_id,
        })?;

    Ok(Json(DataResponse { data: article }))
}

/// GET /api/v1/articles
///
/// List articles with optional status/author filters.
pub async fn list_articles(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ArticleQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    // Reject unknown status filters instead of returning an empty list.
    let status = params
        .status
        .as_deref()
        .map(|s| s.parse::<ArticleStatus>())
        .transpose()
        .map_err(CoreError::Validation)?;

    let articles = ArticleRepo::list(
        &state.pool,
        status.map(ArticleStatus::as_str),
        params.author_id,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: articles }))
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{id}/transitions
///
/// Apply a lifecycle action to an article. The caller's id and role come
/// from the access token; the engine enforces the transition table and role
/// gates.
pub async fn transition_article(
    user: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = LifecycleEngine::apply(
        &state.pool,
        &state.dispatcher,
        TransitionCommand {
            article_id,
            action: input.action,
            caller_id: user.user_id,
            caller_role: user.role,
            target_user_id: input.target_user_id,
            comments: input.comments,
        },
    )
    .await?;

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// Workflow audit trail
// ---------------------------------------------------------------------------

/// GET /api/v1/articles/{id}/workflow-log
///
/// Return an article's full audit trail in transition order. Editorial
/// staff only.
pub async fn get_workflow_log(
    RequireEditorial(_user): RequireEditorial,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for a dangling article id rather than an empty trail.
    ArticleRepo::find_by_id(&state.pool, article_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Article",
            id: article_id,
        })?;

    let entries = WorkflowLogRepo::list_for_article(&state.pool, article_id).await?;

    Ok(Json(DataResponse { data: entries }))
}
