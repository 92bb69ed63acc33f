//! The closed set of notification types consumed by the notification UI.
//!
//! The string values must match the CHECK constraint on
//! `notifications.notification_type`. `CommentAdded` is emitted by the
//! external comment collaborator through the dispatcher; no lifecycle action
//! maps to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a user-facing notification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ArticleAssigned,
    ReviewSubmitted,
    ApprovalRequired,
    ArticlePublished,
    ArticleRejected,
    RevisionRequested,
    CommentAdded,
    ReviewRequestResponse,
    ReviewRequestSent,
}

impl NotificationType {
    /// All notification types, in CHECK-constraint order.
    pub const ALL: [NotificationType; 9] = [
        NotificationType::ArticleAssigned,
        NotificationType::ReviewSubmitted,
        NotificationType::ApprovalRequired,
        NotificationType::ArticlePublished,
        NotificationType::ArticleRejected,
        NotificationType::RevisionRequested,
        NotificationType::CommentAdded,
        NotificationType::ReviewRequestResponse,
        NotificationType::ReviewRequestSent,
    ];

    /// The database/wire representation of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::ArticleAssigned => "article_assigned",
            NotificationType::ReviewSubmitted => "review_submitted",
            NotificationType::ApprovalRequired => "approval_required",
            NotificationType::ArticlePublished => "article_published",
            NotificationType::ArticleRejected => "article_rejected",
            NotificationType::RevisionRequested => "revision_requested",
            NotificationType::CommentAdded => "comment_added",
            NotificationType::ReviewRequestResponse => "review_request_response",
            NotificationType::ReviewRequestSent => "review_request_sent",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown notification type '{s}'"))
    }
}
