//! Workflow audit-trail entity models.
//!
//! Entries are immutable once created; there is no update DTO.

use serde::Serialize;
use sqlx::FromRow;

use quill_core::roles::Role;
use quill_core::types::{DbId, Timestamp};
use quill_core::workflow::WorkflowAction;

/// A row from the `workflow_log` table. One row per lifecycle transition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowLogEntry {
    pub id: DbId,
    pub article_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: Option<DbId>,
    pub from_role: String,
    pub to_role: Option<String>,
    pub action: String,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a new audit-trail entry.
#[derive(Debug, Clone)]
pub struct CreateWorkflowLogEntry {
    pub article_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: Option<DbId>,
    pub from_role: Role,
    pub to_role: Option<Role>,
    pub action: WorkflowAction,
    pub comments: Option<String>,
}
