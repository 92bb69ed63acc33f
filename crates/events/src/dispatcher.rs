//! Notification creation and best-effort delivery.
//!
//! The dispatcher is the single write path for notification records. The
//! [`notify`](NotificationDispatcher::notify) wrapper is used for
//! side-effect notifications after a primary mutation has committed: a store
//! failure there is logged and swallowed, never rolled back or surfaced,
//! since losing a notification is recoverable while losing a status change
//! is not.

use std::sync::Arc;

use quill_core::types::DbId;
use quill_db::models::notification::CreateNotification;
use quill_db::repositories::NotificationRepo;
use quill_db::DbPool;

use crate::bus::{EventBus, JournalEvent};

/// Creates notification records and fans them out on the event bus.
#[derive(Clone)]
pub struct NotificationDispatcher {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl NotificationDispatcher {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Insert a notification record and publish a `notification.created`
    /// event, returning the generated ID.
    pub async fn create(&self, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        let id = NotificationRepo::create(&self.pool, input).await?;

        let mut event = JournalEvent::new("notification.created").with_payload(serde_json::json!({
            "notification_id": id,
            "user_id": input.user_id,
            "notification_type": input.notification_type.as_str(),
        }));
        if let Some(article_id) = input.article_id {
            event = event.with_article(article_id);
        }
        if let Some(actor) = input.related_user_id {
            event = event.with_actor(actor);
        }
        self.bus.publish(event);

        Ok(id)
    }

    /// Best-effort notification used after a primary transaction commits.
    ///
    /// Failures are logged at `warn` and never propagated.
    pub async fn notify(&self, input: CreateNotification) {
        if let Err(err) = self.create(&input).await {
            tracing::warn!(
                user_id = input.user_id,
                notification_type = %input.notification_type,
                article_id = ?input.article_id,
                error = %err,
                "failed to create notification"
            );
        }
    }
}
