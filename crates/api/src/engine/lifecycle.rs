//! The manuscript lifecycle engine.
//!
//! [`LifecycleEngine::apply`] validates a typed command against the current
//! article status and caller role, then performs the mutation in one
//! transaction: the conditional status update and the audit-trail append
//! commit together (with assignment bookkeeping where the action requires
//! it). The notification side effect runs strictly after commit and is
//! best-effort.

use serde::{Deserialize, Serialize};

use quill_core::error::CoreError;
use quill_core::roles::Role;
use quill_core::types::DbId;
use quill_core::workflow::{self, ArticleStatus, WorkflowAction};
use quill_db::models::article::Article;
use quill_db::models::notification::CreateNotification;
use quill_db::models::workflow_log::CreateWorkflowLogEntry;
use quill_db::repositories::{ArticleRepo, AssignmentRepo, UserRepo, WorkflowLogRepo};
use quill_db::DbPool;
use quill_events::NotificationDispatcher;

use crate::error::{AppError, AppResult};

/// A typed lifecycle command, one per role-specific action.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionCommand {
    pub article_id: DbId,
    pub action: WorkflowAction,
    pub caller_id: DbId,
    pub caller_role: Role,
    /// Recipient of the transition notification and, for assignment-creating
    /// actions, the assignee. There is no implicit default recipient.
    pub target_user_id: Option<DbId>,
    pub comments: Option<String>,
}

/// Result of a successful transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub status: ArticleStatus,
}

/// The single point of truth for article status changes.
pub struct LifecycleEngine;

impl LifecycleEngine {
    /// Apply a lifecycle command.
    ///
    /// Every failure leaves the article, the audit trail, and the
    /// assignment table untouched. On success exactly one audit-trail entry
    /// is appended, and at most one notification is emitted (when
    /// `target_user_id` is present).
    pub async fn apply(
        pool: &DbPool,
        dispatcher: &NotificationDispatcher,
        cmd: TransitionCommand,
    ) -> AppResult<TransitionOutcome> {
        let article = ArticleRepo::find_by_id(pool, cmd.article_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Article",
                id: cmd.article_id,
            })?;

        if !workflow::allowed_roles(cmd.action).contains(&cmd.caller_role) {
            return Err(CoreError::RoleNotAllowed {
                role: cmd.caller_role,
                action: cmd.action,
            }
            .into());
        }

        let current = article.lifecycle_status()?;
        let next = workflow::transition(current, cmd.action).ok_or(CoreError::InvalidTransition {
            status: current,
            action: cmd.action,
        })?;

        // Resolve the target user up front so a dangling id fails before any
        // mutation, and so the audit entry can record the recipient's role.
        let target = match cmd.target_user_id {
            Some(id) => Some(
                UserRepo::find_by_id(pool, id)
                    .await?
                    .ok_or(CoreError::NotFound { entity: "User", id })?,
            ),
            None => None,
        };
        let to_role = target.as_ref().map(|u| u.parsed_role()).transpose()?;

        // A reviewer may only forward an article they actively hold.
        if cmd.action == WorkflowAction::Forward {
            let active = AssignmentRepo::find_active(pool, cmd.article_id, cmd.caller_id).await?;
            if active.is_none() {
                return Err(CoreError::NotAssigned {
                    article_id: cmd.article_id,
                    reviewer_id: cmd.caller_id,
                }
                .into());
            }
        }

        let mut tx = pool.begin().await?;

        // Conditional update: losing a concurrent race surfaces as a stale
        // InvalidTransition, never a retry. Dropping `tx` rolls back.
        let updated =
            ArticleRepo::update_status_if(&mut *tx, cmd.article_id, current.as_str(), next.as_str())
                .await?;
        if !updated {
            return Err(CoreError::InvalidTransition {
                status: current,
                action: cmd.action,
            }
            .into());
        }

        WorkflowLogRepo::append(
            &mut *tx,
            &CreateWorkflowLogEntry {
                article_id: cmd.article_id,
                from_user_id: cmd.caller_id,
                to_user_id: cmd.target_user_id,
                from_role: cmd.caller_role,
                to_role,
                action: cmd.action,
                comments: cmd.comments.clone(),
            },
        )
        .await?;

        match cmd.action {
            WorkflowAction::Forward => {
                AssignmentRepo::complete(&mut *tx, cmd.article_id, cmd.caller_id).await?;
            }
            WorkflowAction::AssignAssistantEditor | WorkflowAction::SendToPeerReview => {
                if let Some(assignee) = cmd.target_user_id {
                    AssignmentRepo::create(&mut *tx, cmd.article_id, assignee)
                        .await
                        .map_err(|err| {
                            if quill_db::is_unique_violation(
                                &err,
                                quill_db::repositories::assignment_repo::UQ_ACTIVE,
                            ) {
                                AppError::Core(CoreError::DuplicateAssignment {
                                    article_id: cmd.article_id,
                                    reviewer_id: assignee,
                                })
                            } else {
                                AppError::Database(err)
                            }
                        })?;
                }
            }
            _ => {}
        }

        tx.commit().await?;

        tracing::info!(
            article_id = cmd.article_id,
            action = %cmd.action,
            from = %current,
            to = %next,
            caller_id = cmd.caller_id,
            "article transition applied"
        );

        if let Some(recipient) = cmd.target_user_id {
            let (title, message) = notification_copy(cmd.action, &article);
            dispatcher
                .notify(CreateNotification {
                    user_id: recipient,
                    notification_type: workflow::notification_type(cmd.action),
                    title,
                    message,
                    article_id: Some(cmd.article_id),
                    related_user_id: Some(cmd.caller_id),
                    action_url: Some(format!("/articles/{}", cmd.article_id)),
                })
                .await;
        }

        Ok(TransitionOutcome { status: next })
    }
}

/// Human-readable title and message for a transition notification.
fn notification_copy(action: WorkflowAction, article: &Article) -> (String, String) {
    use WorkflowAction::*;

    let title = article.title.as_str();
    match action {
        Submit | Approve => (
            "Approval required".to_string(),
            format!("\"{title}\" is awaiting your editorial review."),
        ),
        AssignAssistantEditor | SendToPeerReview => (
            "Article assigned".to_string(),
            format!("You have been assigned \"{title}\"."),
        ),
        Publish => (
            "Article published".to_string(),
            format!("\"{title}\" has been published."),
        ),
        Reject => (
            "Article rejected".to_string(),
            format!("\"{title}\" has been rejected."),
        ),
        RequestRevision => (
            "Revision requested".to_string(),
            format!("A revision of \"{title}\" has been requested."),
        ),
        Forward => (
            "Review submitted".to_string(),
            format!("A review of \"{title}\" has been submitted."),
        ),
    }
}
