//! Reviewer assignments and the editor-reviewer review-request handshake.
//!
//! Uniqueness invariants (one active assignment per pair, one pending
//! request per pair) ride the store's partial unique indexes; this module
//! translates the violations into the typed conflict errors.

use serde::{Deserialize, Serialize};

use quill_core::error::CoreError;
use quill_core::notifications::NotificationType;
use quill_core::roles::Role;
use quill_core::types::DbId;
use quill_db::models::assignment::Assignment;
use quill_db::models::notification::CreateNotification;
use quill_db::models::review_request::{
    CreateReviewRequest, ReviewRequest, REQUEST_ACCEPTED, REQUEST_REJECTED,
};
use quill_db::models::user::User;
use quill_db::repositories::{
    assignment_repo, review_request_repo, ArticleRepo, AssignmentRepo, ReviewRequestRepo, UserRepo,
};
use quill_db::DbPool;
use quill_events::NotificationDispatcher;

use crate::error::{AppError, AppResult};

/// A reviewer's decision on a pending review request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accept,
    Reject,
}

/// Result of responding to a review request.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponseOutcome {
    /// The request's resulting status (`accepted` or `rejected`).
    pub status: String,
    /// Number of assignments created as a side effect (0 or 1). Zero on
    /// rejection, and on acceptance when the origin article's pair already
    /// had an active assignment.
    pub assignments_created: u32,
}

/// Brokers assignments and review requests between editors and reviewers.
pub struct ReviewBoard;

impl ReviewBoard {
    /// Assign a reviewer to an article (editor-initiated path).
    ///
    /// The article and reviewer must exist and the reviewer must hold the
    /// `reviewer` role. A pair that already has an active assignment fails
    /// with `DuplicateAssignment`.
    pub async fn create_assignment(
        pool: &DbPool,
        dispatcher: &NotificationDispatcher,
        article_id: DbId,
        reviewer_id: DbId,
        assigned_by: DbId,
    ) -> AppResult<Assignment> {
        let article = ArticleRepo::find_by_id(pool, article_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Article",
                id: article_id,
            })?;
        require_reviewer(pool, reviewer_id).await?;

        let assignment = AssignmentRepo::create(pool, article_id, reviewer_id)
            .await
            .map_err(|err| map_duplicate_assignment(err, article_id, reviewer_id))?;

        tracing::info!(
            article_id,
            reviewer_id,
            assigned_by,
            "reviewer assigned to article"
        );

        dispatcher
            .notify(CreateNotification {
                user_id: reviewer_id,
                notification_type: NotificationType::ArticleAssigned,
                title: "Article assigned".to_string(),
                message: format!("You have been assigned \"{}\".", article.title),
                article_id: Some(article_id),
                related_user_id: Some(assigned_by),
                action_url: Some(format!("/articles/{article_id}")),
            })
            .await;

        Ok(assignment)
    }

    /// Send a standing review request from an editor to a reviewer.
    ///
    /// At most one pending request may exist per (editor, reviewer) pair; a
    /// second send fails with `DuplicatePendingRequest`. A rejected request
    /// does not block re-sending.
    pub async fn send_review_request(
        pool: &DbPool,
        dispatcher: &NotificationDispatcher,
        editor_id: DbId,
        reviewer_id: DbId,
        article_id: Option<DbId>,
    ) -> AppResult<ReviewRequest> {
        require_reviewer(pool, reviewer_id).await?;
        if let Some(id) = article_id {
            ArticleRepo::find_by_id(pool, id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Article",
                    id,
                })?;
        }

        let request = ReviewRequestRepo::create(
            pool,
            &CreateReviewRequest {
                editor_id,
                reviewer_id,
                article_id,
            },
        )
        .await
        .map_err(|err| {
            if quill_db::is_unique_violation(&err, review_request_repo::UQ_PENDING) {
                AppError::Core(CoreError::DuplicatePendingRequest {
                    editor_id,
                    reviewer_id,
                })
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::info!(
            request_id = request.id,
            editor_id,
            reviewer_id,
            "review request sent"
        );

        dispatcher
            .notify(CreateNotification {
                user_id: reviewer_id,
                notification_type: NotificationType::ReviewRequestSent,
                title: "Review request".to_string(),
                message: "An editor has invited you to review submissions.".to_string(),
                article_id,
                related_user_id: Some(editor_id),
                action_url: Some(format!("/review-requests/{}", request.id)),
            })
            .await;

        Ok(request)
    }

    /// Record a reviewer's decision on a pending request.
    ///
    /// Acceptance assigns only the request-origin article, and skips
    /// silently when that pair already has an active assignment, so
    /// accepting is an idempotent convenience action. The requesting editor
    /// is notified of either decision.
    pub async fn respond_to_review_request(
        pool: &DbPool,
        dispatcher: &NotificationDispatcher,
        request_id: DbId,
        reviewer_id: DbId,
        decision: ReviewDecision,
    ) -> AppResult<ReviewResponseOutcome> {
        let request = ReviewRequestRepo::find_by_id(pool, request_id)
            .await?
            .filter(|r| r.reviewer_id == reviewer_id)
            .ok_or(CoreError::NotFound {
                entity: "ReviewRequest",
                id: request_id,
            })?;

        let new_status = match decision {
            ReviewDecision::Accept => REQUEST_ACCEPTED,
            ReviewDecision::Reject => REQUEST_REJECTED,
        };

        // The conditional update closes the race between two concurrent
        // responders: exactly one observes the pending row.
        let updated = ReviewRequestRepo::set_status_if_pending(pool, request_id, new_status)
            .await?
            .ok_or(CoreError::AlreadyProcessed {
                entity: "ReviewRequest",
                id: request_id,
            })?;

        let mut assignments_created = 0u32;
        if decision == ReviewDecision::Accept {
            if let Some(article_id) = updated.article_id {
                match AssignmentRepo::create(pool, article_id, reviewer_id).await {
                    Ok(_) => {
                        assignments_created = 1;
                        if let Some(article) = ArticleRepo::find_by_id(pool, article_id).await? {
                            dispatcher
                                .notify(CreateNotification {
                                    user_id: reviewer_id,
                                    notification_type: NotificationType::ArticleAssigned,
                                    title: "Article assigned".to_string(),
                                    message: format!(
                                        "You have been assigned \"{}\".",
                                        article.title
                                    ),
                                    article_id: Some(article_id),
                                    related_user_id: Some(updated.editor_id),
                                    action_url: Some(format!("/articles/{article_id}")),
                                })
                                .await;
                        }
                    }
                    Err(err)
                        if quill_db::is_unique_violation(&err, assignment_repo::UQ_ACTIVE) =>
                    {
                        // Already actively assigned: acceptance stays idempotent.
                        tracing::debug!(
                            request_id,
                            article_id,
                            reviewer_id,
                            "origin article already assigned; skipping"
                        );
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }

        tracing::info!(
            request_id,
            reviewer_id,
            status = %updated.status,
            assignments_created,
            "review request resolved"
        );

        let decision_word = match decision {
            ReviewDecision::Accept => "accepted",
            ReviewDecision::Reject => "declined",
        };
        dispatcher
            .notify(CreateNotification {
                user_id: request.editor_id,
                notification_type: NotificationType::ReviewRequestResponse,
                title: "Review request answered".to_string(),
                message: format!("Your review request has been {decision_word}."),
                article_id: updated.article_id,
                related_user_id: Some(reviewer_id),
                action_url: Some(format!("/review-requests/{request_id}")),
            })
            .await;

        Ok(ReviewResponseOutcome {
            status: updated.status,
            assignments_created,
        })
    }
}

/// Look up a user and require the `reviewer` role.
async fn require_reviewer(pool: &DbPool, user_id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    if user.parsed_role()? != Role::Reviewer {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {user_id} does not hold the reviewer role"
        ))));
    }
    Ok(user)
}

/// Translate a unique violation on the active-assignment index.
fn map_duplicate_assignment(err: sqlx::Error, article_id: DbId, reviewer_id: DbId) -> AppError {
    if quill_db::is_unique_violation(&err, assignment_repo::UQ_ACTIVE) {
        AppError::Core(CoreError::DuplicateAssignment {
            article_id,
            reviewer_id,
        })
    } else {
        AppError::Database(err)
    }
}
