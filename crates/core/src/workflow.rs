//! Manuscript lifecycle states, actions, and the transition table.
//!
//! [`transition`] is the single source of truth for legal status changes.
//! It is total over `(status, action)`: every pair outside the table yields
//! `None`, which callers surface as an `InvalidTransition` error without
//! mutating anything. Terminal states (`published`, `rejected`) have no
//! outgoing transitions; a manuscript re-enters the flow only as a new
//! draft.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::notifications::NotificationType;
use crate::roles::Role;

// ---------------------------------------------------------------------------
// ArticleStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an article.
///
/// The string values must match the CHECK constraint on `articles.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Submitted,
    UnderReview,
    WithEditor,
    Accepted,
    WithAdmin,
    Published,
    Rejected,
    RevisionRequired,
}

impl ArticleStatus {
    /// All statuses, in CHECK-constraint order.
    pub const ALL: [ArticleStatus; 9] = [
        ArticleStatus::Draft,
        ArticleStatus::Submitted,
        ArticleStatus::UnderReview,
        ArticleStatus::WithEditor,
        ArticleStatus::Accepted,
        ArticleStatus::WithAdmin,
        ArticleStatus::Published,
        ArticleStatus::Rejected,
        ArticleStatus::RevisionRequired,
    ];

    /// The database/wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Submitted => "submitted",
            ArticleStatus::UnderReview => "under_review",
            ArticleStatus::WithEditor => "with_editor",
            ArticleStatus::Accepted => "accepted",
            ArticleStatus::WithAdmin => "with_admin",
            ArticleStatus::Published => "published",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::RevisionRequired => "revision_required",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ArticleStatus::Published | ArticleStatus::Rejected)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArticleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown article status '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// WorkflowAction
// ---------------------------------------------------------------------------

/// A role-specific command against an article's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Submit,
    AssignAssistantEditor,
    SendToPeerReview,
    Approve,
    Publish,
    Reject,
    RequestRevision,
    Forward,
}

impl WorkflowAction {
    /// All actions.
    pub const ALL: [WorkflowAction; 8] = [
        WorkflowAction::Submit,
        WorkflowAction::AssignAssistantEditor,
        WorkflowAction::SendToPeerReview,
        WorkflowAction::Approve,
        WorkflowAction::Publish,
        WorkflowAction::Reject,
        WorkflowAction::RequestRevision,
        WorkflowAction::Forward,
    ];

    /// The wire/audit-log representation of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowAction::Submit => "submit",
            WorkflowAction::AssignAssistantEditor => "assign_assistant_editor",
            WorkflowAction::SendToPeerReview => "send_to_peer_review",
            WorkflowAction::Approve => "approve",
            WorkflowAction::Publish => "publish",
            WorkflowAction::Reject => "reject",
            WorkflowAction::RequestRevision => "request_revision",
            WorkflowAction::Forward => "forward",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown workflow action '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Resolve the target status for `action` applied in `status`.
///
/// Returns `None` for every pair outside the table. `reject` is legal from
/// any non-terminal status; `request_revision` sends the manuscript back to
/// `draft` for the author to rework.
pub fn transition(status: ArticleStatus, action: WorkflowAction) -> Option<ArticleStatus> {
    use ArticleStatus::*;
    use WorkflowAction::*;

    match (status, action) {
        (Draft, Submit) => Some(Submitted),
        (Submitted, AssignAssistantEditor) => Some(UnderReview),
        (UnderReview, SendToPeerReview) => Some(WithEditor),
        (UnderReview, Forward) => Some(Accepted),
        (WithEditor, Approve) => Some(WithEditor),
        (WithEditor, Publish) => Some(Published),
        (WithEditor, RequestRevision) => Some(Draft),
        (from, Reject) if !from.is_terminal() => Some(Rejected),
        _ => None,
    }
}

/// Roles permitted to perform `action`.
///
/// Administrators hold the same authority as editors for the terminal
/// actions (`publish`, `reject`) and no more.
pub fn allowed_roles(action: WorkflowAction) -> &'static [Role] {
    use WorkflowAction::*;

    match action {
        Submit => &[Role::Author],
        AssignAssistantEditor | SendToPeerReview | Approve | RequestRevision => &[Role::Editor],
        Publish | Reject => &[Role::Editor, Role::Administrator],
        Forward => &[Role::Reviewer],
    }
}

/// Notification type emitted when a transition names a target user.
pub fn notification_type(action: WorkflowAction) -> NotificationType {
    use WorkflowAction::*;

    match action {
        Submit | Approve => NotificationType::ApprovalRequired,
        AssignAssistantEditor | SendToPeerReview => NotificationType::ArticleAssigned,
        Publish => NotificationType::ArticlePublished,
        Reject => NotificationType::ArticleRejected,
        RequestRevision => NotificationType::RevisionRequested,
        Forward => NotificationType::ReviewSubmitted,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
