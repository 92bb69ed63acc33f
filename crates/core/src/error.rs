//! Domain error taxonomy shared by every crate.
//!
//! State-conflict variants (`InvalidTransition`, `DuplicateAssignment`,
//! `DuplicatePendingRequest`, `AlreadyProcessed`) are expected,
//! recoverable-by-caller conditions and are never retried automatically.

use crate::roles::Role;
use crate::types::DbId;
use crate::workflow::{ArticleStatus, WorkflowAction};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No '{action}' transition from status '{status}'")]
    InvalidTransition {
        status: ArticleStatus,
        action: WorkflowAction,
    },

    #[error("Reviewer {reviewer_id} has no active assignment on article {article_id}")]
    NotAssigned { article_id: DbId, reviewer_id: DbId },

    #[error("Reviewer {reviewer_id} is already assigned to article {article_id}")]
    DuplicateAssignment { article_id: DbId, reviewer_id: DbId },

    #[error("A pending review request from editor {editor_id} to reviewer {reviewer_id} already exists")]
    DuplicatePendingRequest { editor_id: DbId, reviewer_id: DbId },

    #[error("{entity} {id} has already been processed")]
    AlreadyProcessed { entity: &'static str, id: DbId },

    #[error("Role '{role}' may not perform '{action}'")]
    RoleNotAllowed { role: Role, action: WorkflowAction },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_status_and_action() {
        let err = CoreError::InvalidTransition {
            status: ArticleStatus::Published,
            action: WorkflowAction::Publish,
        };
        let msg = err.to_string();
        assert!(msg.contains("publish"));
        assert!(msg.contains("published"));
    }

    #[test]
    fn not_assigned_names_both_ids() {
        let err = CoreError::NotAssigned {
            article_id: 1,
            reviewer_id: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains('1'));
        assert!(msg.contains('9'));
    }
}
