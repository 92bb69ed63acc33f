//! Integration tests for the editor-initiated assignment path.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, get, post_json, seed_article, seed_user, token_for,
};
use quill_core::roles::Role;
use quill_db::repositories::{ArticleRepo, NotificationRepo, WorkflowLogRepo};
use sqlx::PgPool;

fn assignment_body(article_id: i64, reviewer_id: i64) -> serde_json::Value {
    serde_json::json!({ "article_id": article_id, "reviewer_id": reviewer_id })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editor_assigns_a_reviewer(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let article_id = seed_article(&pool, &author, "On Ownership").await;
    let app = build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/assignments",
        &token_for(&editor),
        assignment_body(article_id, reviewer.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["article_id"], article_id);
    assert_eq!(json["data"]["reviewer_id"], reviewer.id);
    assert_eq!(json["data"]["status"], "assigned");

    // The reviewer is told about the new assignment.
    let inbox = NotificationRepo::list_for_user(&pool, reviewer.id, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, "article_assigned");
    assert_eq!(inbox[0].article_id, Some(article_id));
}

// Scenario D: a duplicate assignment is rejected and mutates nothing else.
#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_assignment_is_rejected_without_side_effects(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let article_id = seed_article(&pool, &author, "On Ownership").await;
    let app = build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/v1/assignments",
        &token_for(&editor),
        assignment_body(article_id, reviewer.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/v1/assignments",
        &token_for(&editor),
        assignment_body(article_id, reviewer.id),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "DUPLICATE_ASSIGNMENT").await;

    // Article status and audit trail are untouched by the failed attempt.
    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.status, "draft");
    assert_eq!(
        WorkflowLogRepo::count_for_article(&pool, article_id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assigning_a_missing_article_returns_404(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/assignments",
        &token_for(&editor),
        assignment_body(9999, reviewer.id),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assigning_a_non_reviewer_is_a_validation_error(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let article_id = seed_article(&pool, &author, "On Ownership").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/assignments",
        &token_for(&editor),
        assignment_body(article_id, author.id),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reviewer_lists_only_their_active_assignments(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let other = seed_user(&pool, "Otto Other", Role::Reviewer).await;
    let first = seed_article(&pool, &author, "First").await;
    let second = seed_article(&pool, &author, "Second").await;
    let app = build_test_app(pool.clone());

    for (article_id, reviewer_id) in [(first, reviewer.id), (second, other.id)] {
        let response = post_json(
            app.clone(),
            "/api/v1/assignments",
            &token_for(&editor),
            assignment_body(article_id, reviewer_id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, "/api/v1/assignments/mine", &token_for(&reviewer)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let mine = json["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["article_id"], first);
}
