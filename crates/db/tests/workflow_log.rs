//! Integration tests for the append-only workflow audit trail.

use sqlx::PgPool;

use quill_core::roles::Role;
use quill_core::workflow::WorkflowAction;
use quill_db::models::article::CreateArticle;
use quill_db::models::user::CreateUser;
use quill_db::models::workflow_log::CreateWorkflowLogEntry;
use quill_db::repositories::{ArticleRepo, UserRepo, WorkflowLogRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str, role: Role) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
            role,
        },
    )
    .await
    .unwrap()
    .id
}

fn entry(
    article_id: i64,
    from_user_id: i64,
    action: WorkflowAction,
) -> CreateWorkflowLogEntry {
    CreateWorkflowLogEntry {
        article_id,
        from_user_id,
        to_user_id: None,
        from_role: Role::Author,
        to_role: None,
        action,
        comments: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn append_records_roles_actions_and_comments(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let article = ArticleRepo::create(
        &pool,
        author,
        &CreateArticle {
            title: "On Ownership".to_string(),
            content: "A manuscript body.".to_string(),
        },
    )
    .await
    .unwrap();

    let appended = WorkflowLogRepo::append(
        &pool,
        &CreateWorkflowLogEntry {
            article_id: article.id,
            from_user_id: author,
            to_user_id: Some(editor),
            from_role: Role::Author,
            to_role: Some(Role::Editor),
            action: WorkflowAction::Submit,
            comments: Some("Please take a look.".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(appended.article_id, article.id);
    assert_eq!(appended.from_role, "author");
    assert_eq!(appended.to_role.as_deref(), Some("editor"));
    assert_eq!(appended.action, "submit");
    assert_eq!(appended.comments.as_deref(), Some("Please take a look."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_entries_in_transition_order(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let article = ArticleRepo::create(
        &pool,
        author,
        &CreateArticle {
            title: "On Ownership".to_string(),
            content: "A manuscript body.".to_string(),
        },
    )
    .await
    .unwrap();

    for action in [
        WorkflowAction::Submit,
        WorkflowAction::AssignAssistantEditor,
        WorkflowAction::SendToPeerReview,
    ] {
        WorkflowLogRepo::append(&pool, &entry(article.id, author, action))
            .await
            .unwrap();
    }

    let trail = WorkflowLogRepo::list_for_article(&pool, article.id)
        .await
        .unwrap();
    let actions: Vec<&str> = trail.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["submit", "assign_assistant_editor", "send_to_peer_review"]
    );

    assert_eq!(
        WorkflowLogRepo::count_for_article(&pool, article.id)
            .await
            .unwrap(),
        3
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_is_zero_for_an_untouched_article(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let article = ArticleRepo::create(
        &pool,
        author,
        &CreateArticle {
            title: "Untouched".to_string(),
            content: "A manuscript body.".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        WorkflowLogRepo::count_for_article(&pool, article.id)
            .await
            .unwrap(),
        0
    );
}
