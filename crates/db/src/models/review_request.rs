//! Review request entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quill_core::types::{DbId, Timestamp};

/// Request is awaiting the reviewer's decision.
pub const REQUEST_PENDING: &str = "pending";

/// The reviewer accepted the invitation.
pub const REQUEST_ACCEPTED: &str = "accepted";

/// The reviewer declined; the editor may re-send a fresh request.
pub const REQUEST_REJECTED: &str = "rejected";

/// A row from the `review_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewRequest {
    pub id: DbId,
    pub editor_id: DbId,
    pub reviewer_id: DbId,
    pub article_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for sending a new review request.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub editor_id: DbId,
    pub reviewer_id: DbId,
    /// Optional request-origin article, assigned on acceptance.
    pub article_id: Option<DbId>,
}
