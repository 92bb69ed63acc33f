//! Notification entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quill_core::notifications::NotificationType;
use quill_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub article_id: Option<DbId>,
    pub related_user_id: Option<DbId>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub article_id: Option<DbId>,
    pub related_user_id: Option<DbId>,
    pub action_url: Option<String>,
}
