//! Repository for the `article_assignments` table.
//!
//! Uniqueness of active assignments is enforced by the partial unique index
//! `uq_article_assignments_active`; callers translate the violation with
//! [`crate::is_unique_violation`].

use sqlx::{PgExecutor, PgPool};

use quill_core::types::DbId;

use crate::models::assignment::Assignment;

/// Column list for `article_assignments` queries.
const COLUMNS: &str = "id, article_id, reviewer_id, status, assigned_at, completed_at";

/// Name of the partial unique index guarding active assignments.
pub const UQ_ACTIVE: &str = "uq_article_assignments_active";

/// Provides CRUD operations for reviewer assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new active assignment.
    ///
    /// Fails with a unique violation on `uq_article_assignments_active` when
    /// the pair already has an active assignment.
    pub async fn create<'e, E>(
        executor: E,
        article_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Assignment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO article_assignments (article_id, reviewer_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(article_id)
            .bind(reviewer_id)
            .fetch_one(executor)
            .await
    }

    /// Find the active assignment for a (article, reviewer) pair, if any.
    pub async fn find_active(
        pool: &PgPool,
        article_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_assignments \
             WHERE article_id = $1 AND reviewer_id = $2 AND status = 'assigned'"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(article_id)
            .bind(reviewer_id)
            .fetch_optional(pool)
            .await
    }

    /// List all assignments for an article, newest first.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_assignments \
             WHERE article_id = $1 \
             ORDER BY assigned_at DESC"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// List a reviewer's active assignments, newest first.
    pub async fn list_active_for_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_assignments \
             WHERE reviewer_id = $1 AND status = 'assigned' \
             ORDER BY assigned_at DESC"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(reviewer_id)
            .fetch_all(pool)
            .await
    }

    /// Mark the active assignment for a pair as completed.
    ///
    /// Returns `false` when no active assignment exists.
    pub async fn complete<'e, E>(
        executor: E,
        article_id: DbId,
        reviewer_id: DbId,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE article_assignments \
             SET status = 'completed', completed_at = NOW() \
             WHERE article_id = $1 AND reviewer_id = $2 AND status = 'assigned'",
        )
        .bind(article_id)
        .bind(reviewer_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
