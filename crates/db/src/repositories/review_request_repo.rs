//! Repository for the `review_requests` table.
//!
//! Pending uniqueness per (editor, reviewer) pair is enforced by the partial
//! unique index `uq_review_requests_pending`.

use sqlx::PgPool;

use quill_core::types::DbId;

use crate::models::review_request::{CreateReviewRequest, ReviewRequest};

/// Column list for `review_requests` queries.
const COLUMNS: &str = "id, editor_id, reviewer_id, article_id, status, created_at, updated_at";

/// Name of the partial unique index guarding pending requests.
pub const UQ_PENDING: &str = "uq_review_requests_pending";

/// Provides CRUD operations for review requests.
pub struct ReviewRequestRepo;

impl ReviewRequestRepo {
    /// Insert a new pending request.
    ///
    /// Fails with a unique violation on `uq_review_requests_pending` when the
    /// pair already has a pending request.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReviewRequest,
    ) -> Result<ReviewRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_requests (editor_id, reviewer_id, article_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewRequest>(&query)
            .bind(input.editor_id)
            .bind(input.reviewer_id)
            .bind(input.article_id)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ReviewRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM review_requests WHERE id = $1");
        sqlx::query_as::<_, ReviewRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests addressed to a reviewer, newest first.
    pub async fn list_for_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<ReviewRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM review_requests \
             WHERE reviewer_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ReviewRequest>(&query)
            .bind(reviewer_id)
            .fetch_all(pool)
            .await
    }

    /// List all requests sent by an editor, newest first.
    pub async fn list_for_editor(
        pool: &PgPool,
        editor_id: DbId,
    ) -> Result<Vec<ReviewRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM review_requests \
             WHERE editor_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ReviewRequest>(&query)
            .bind(editor_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically resolve a pending request to `new_status`.
    ///
    /// Returns the updated row, or `None` when the request was not pending
    /// any more (already processed by a concurrent responder).
    pub async fn set_status_if_pending(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
    ) -> Result<Option<ReviewRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE review_requests \
             SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewRequest>(&query)
            .bind(id)
            .bind(new_status)
            .fetch_optional(pool)
            .await
    }
}
