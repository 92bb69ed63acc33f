//! Repository for the `articles` table.

use sqlx::{PgExecutor, PgPool};

use quill_core::types::DbId;

use crate::models::article::{Article, CreateArticle};

/// Column list for `articles` queries.
const COLUMNS: &str = "id, title, content, author_id, status, created_at, updated_at";

/// Provides CRUD and status-transition operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article. New articles always start in `draft`.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateArticle,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, content, author_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List articles with optional status/author filters, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        author_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $3");
        }
        if author_id.is_some() {
            conditions.push(if status.is_some() {
                "author_id = $4"
            } else {
                "author_id = $3"
            });
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM articles {where_clause} \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );

        let mut q = sqlx::query_as::<_, Article>(&query).bind(limit).bind(offset);
        if let Some(s) = status {
            q = q.bind(s.to_string());
        }
        if let Some(a) = author_id {
            q = q.bind(a);
        }
        q.fetch_all(pool).await
    }

    /// Atomically move an article from `expected` to `new_status`.
    ///
    /// The update succeeds only when the stored status still matches
    /// `expected`; a `false` return means another command won the race and
    /// the caller must surface a stale-state conflict, not retry.
    pub async fn update_status_if<'e, E>(
        executor: E,
        id: DbId,
        expected: &str,
        new_status: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE articles \
             SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected)
        .bind(new_status)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
