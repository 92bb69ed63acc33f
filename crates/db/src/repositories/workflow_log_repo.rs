//! Repository for the append-only `workflow_log` table.
//!
//! There is deliberately no update or delete method: audit history is
//! immutable.

use sqlx::{PgExecutor, PgPool};

use quill_core::types::DbId;

use crate::models::workflow_log::{CreateWorkflowLogEntry, WorkflowLogEntry};

/// Column list for `workflow_log` queries.
const COLUMNS: &str = "id, article_id, from_user_id, to_user_id, from_role, to_role, \
     action, comments, created_at";

/// Provides append and query operations for the workflow audit trail.
pub struct WorkflowLogRepo;

impl WorkflowLogRepo {
    /// Append one audit-trail entry.
    ///
    /// Runs on the lifecycle engine's transaction so the entry commits
    /// atomically with the status change it records.
    pub async fn append<'e, E>(
        executor: E,
        entry: &CreateWorkflowLogEntry,
    ) -> Result<WorkflowLogEntry, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO workflow_log \
                 (article_id, from_user_id, to_user_id, from_role, to_role, action, comments) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowLogEntry>(&query)
            .bind(entry.article_id)
            .bind(entry.from_user_id)
            .bind(entry.to_user_id)
            .bind(entry.from_role.as_str())
            .bind(entry.to_role.map(|r| r.as_str()))
            .bind(entry.action.as_str())
            .bind(&entry.comments)
            .fetch_one(executor)
            .await
    }

    /// List an article's audit trail in transition order.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<WorkflowLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_log \
             WHERE article_id = $1 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkflowLogEntry>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Count audit-trail entries for an article.
    pub async fn count_for_article(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM workflow_log WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
