//! Integration tests for the editor-reviewer review-request handshake.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, get, post_json, seed_article, seed_user, token_for,
};
use quill_core::roles::Role;
use quill_db::repositories::{AssignmentRepo, NotificationRepo};
use sqlx::PgPool;

fn request_body(reviewer_id: i64, article_id: Option<i64>) -> serde_json::Value {
    serde_json::json!({ "reviewer_id": reviewer_id, "article_id": article_id })
}

fn respond(decision: &str) -> serde_json::Value {
    serde_json::json!({ "decision": decision })
}

/// POST a review request and return the created request id.
async fn send_request(
    app: axum::Router,
    editor_token: &str,
    reviewer_id: i64,
    article_id: Option<i64>,
) -> i64 {
    let response = post_json(
        app,
        "/api/v1/review-requests",
        editor_token,
        request_body(reviewer_id, article_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sending_a_request_notifies_the_reviewer(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let app = build_test_app(pool.clone());

    let request_id = send_request(app, &token_for(&editor), reviewer.id, None).await;

    let inbox = NotificationRepo::list_for_user(&pool, reviewer.id, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, "review_request_sent");
    assert_eq!(inbox[0].related_user_id, Some(editor.id));
    assert!(request_id > 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_pending_request_for_the_pair_is_rejected(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let app = build_test_app(pool);

    send_request(app.clone(), &token_for(&editor), reviewer.id, None).await;

    let response = post_json(
        app,
        "/api/v1/review-requests",
        &token_for(&editor),
        request_body(reviewer.id, None),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "DUPLICATE_PENDING_REQUEST").await;
}

// Scenario B: accepting a request assigns the request-origin article and
// notifies both sides of the handshake.
#[sqlx::test(migrations = "../../db/migrations")]
async fn accepting_assigns_the_origin_article_and_notifies_both_parties(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let article_id = seed_article(&pool, &author, "On Ownership").await;
    let app = build_test_app(pool.clone());

    let request_id =
        send_request(app.clone(), &token_for(&editor), reviewer.id, Some(article_id)).await;

    let response = post_json(
        app,
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&reviewer),
        respond("accept"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "accepted");
    assert_eq!(json["data"]["assignments_created"], 1);

    // Exactly one active assignment for the pair.
    let assignment = AssignmentRepo::find_active(&pool, article_id, reviewer.id)
        .await
        .unwrap()
        .expect("acceptance must create the assignment");
    assert_eq!(assignment.status, "assigned");

    // Reviewer: review_request_sent + article_assigned. Editor: the response.
    let reviewer_inbox = NotificationRepo::list_for_user(&pool, reviewer.id, false, 50, 0)
        .await
        .unwrap();
    assert!(reviewer_inbox
        .iter()
        .any(|n| n.notification_type == "article_assigned" && n.article_id == Some(article_id)));

    let editor_inbox = NotificationRepo::list_for_user(&pool, editor.id, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(editor_inbox.len(), 1);
    assert_eq!(editor_inbox[0].notification_type, "review_request_response");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responding_twice_fails_with_already_processed(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let app = build_test_app(pool);

    let request_id = send_request(app.clone(), &token_for(&editor), reviewer.id, None).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&reviewer),
        respond("accept"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Regardless of the second decision, the request is already resolved.
    let response = post_json(
        app,
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&reviewer),
        respond("reject"),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "ALREADY_PROCESSED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn accepting_with_an_existing_assignment_skips_creation(pool: PgPool) {
    let author = seed_user(&pool, "Ada Author", Role::Author).await;
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let article_id = seed_article(&pool, &author, "On Ownership").await;
    let app = build_test_app(pool.clone());

    // The pair is already actively assigned through the direct path.
    let response = post_json(
        app.clone(),
        "/api/v1/assignments",
        &token_for(&editor),
        serde_json::json!({ "article_id": article_id, "reviewer_id": reviewer.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let request_id =
        send_request(app.clone(), &token_for(&editor), reviewer.id, Some(article_id)).await;

    // Acceptance is an idempotent convenience: no error, no second row.
    let response = post_json(
        app,
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&reviewer),
        respond("accept"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "accepted");
    assert_eq!(json["data"]["assignments_created"], 0);

    let rows = AssignmentRepo::list_for_article(&pool, article_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejecting_allows_a_fresh_request(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let app = build_test_app(pool);

    let request_id = send_request(app.clone(), &token_for(&editor), reviewer.id, None).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&reviewer),
        respond("reject"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["assignments_created"], 0);

    // A rejected request does not block re-sending.
    let second = send_request(app.clone(), &token_for(&editor), reviewer.id, None).await;
    assert_ne!(second, request_id);

    let response = get(app, "/api/v1/review-requests/mine", &token_for(&reviewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_addressed_reviewer_may_respond(pool: PgPool) {
    let editor = seed_user(&pool, "Ed Editor", Role::Editor).await;
    let reviewer = seed_user(&pool, "Rhea Reviewer", Role::Reviewer).await;
    let other = seed_user(&pool, "Otto Other", Role::Reviewer).await;
    let app = build_test_app(pool);

    let request_id = send_request(app.clone(), &token_for(&editor), reviewer.id, None).await;

    let response = post_json(
        app,
        &format!("/api/v1/review-requests/{request_id}/respond"),
        &token_for(&other),
        respond("accept"),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
