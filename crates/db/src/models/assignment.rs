//! Reviewer assignment entity models.

use serde::Serialize;
use sqlx::FromRow;

use quill_core::types::{DbId, Timestamp};

/// Assignment is active; the reviewer owes a verdict.
pub const ASSIGNMENT_ASSIGNED: &str = "assigned";

/// The reviewer has forwarded a verdict.
pub const ASSIGNMENT_COMPLETED: &str = "completed";

/// A row from the `article_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub article_id: DbId,
    pub reviewer_id: DbId,
    pub status: String,
    pub assigned_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}
