//! Quill event bus and notification infrastructure.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, consumed by UI-facing subscribers.
//! - [`JournalEvent`] — the canonical domain event envelope.
//! - [`NotificationDispatcher`] — creates per-user notification records and
//!   provides the best-effort delivery path used after a primary mutation
//!   has committed.

pub mod bus;
pub mod dispatcher;

pub use bus::{EventBus, JournalEvent};
pub use dispatcher::NotificationDispatcher;
