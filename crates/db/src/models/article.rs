//! Article entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use quill_core::error::CoreError;
use quill_core::types::{DbId, Timestamp};
use quill_core::workflow::ArticleStatus;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub author_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    /// Parse the stored status into the typed enum.
    ///
    /// The CHECK constraint guarantees the column holds a known value, so a
    /// parse failure indicates a schema/enum mismatch and maps to `Internal`.
    pub fn lifecycle_status(&self) -> Result<ArticleStatus, CoreError> {
        self.status
            .parse()
            .map_err(|_| CoreError::Internal(format!("Unknown stored status '{}'", self.status)))
    }
}

/// DTO for creating a new draft article.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticle {
    #[validate(length(min = 1, max = 500, message = "title must be 1-500 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}
