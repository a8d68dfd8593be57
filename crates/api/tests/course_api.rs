//! HTTP-level integration tests for the `/courses` API endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Scenarios that need several transitions drive them all through the HTTP
//! surface so the full handler-to-repository path is exercised.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn instructor_actor() -> serde_json::Value {
    json!({ "id": 1, "name": "Ida Instructor", "email": "ida@example.com" })
}

fn admin_actor() -> serde_json::Value {
    json!({ "id": 100, "name": "Ada Admin", "email": "ada@example.com" })
}

/// A creation payload that passes the submission readiness check.
fn complete_course_payload() -> serde_json::Value {
    json!({
        "title": "Practical Rust",
        "subtitle": "From zero to shipping",
        "description": "Ownership without tears",
        "category": "programming",
        "level": "intermediate",
        "language": "en",
        "pricing": { "mode": "paid", "amount": 49.0 },
        "objectives": ["read lifetimes"],
        "syllabus": ["week 1: ownership"],
        "requirements": ["a laptop"],
        "target_audience": ["backend developers"],
        "curriculum": [
            { "title": "Intro", "lectures": [{ "title": "Hello" }] }
        ],
        "media_files": [{ "name": "promo.mp4", "duration": 90 }],
        "instructor_id": 1,
        "instructor_name": "Ida Instructor",
        "instructor_email": "ida@example.com"
    })
}

async fn create_course(pool: &PgPool) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/courses",
        complete_course_payload(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn transition(pool: &PgPool, id: i64, action: &str, body: serde_json::Value) -> StatusCode {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}/{action}"),
        body,
    )
    .await;
    response.status()
}

// ---------------------------------------------------------------------------
// Creation and retrieval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_returns_draft(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/courses",
        complete_course_payload(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["version"], 1);
    assert_eq!(json["data"]["is_locked"], false);
    assert_eq!(json["data"]["is_published"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_course_rejects_blank_title(pool: PgPool) {
    let mut payload = complete_course_payload();
    payload["title"] = json!("   ");

    let response = post_json(build_test_app(pool), "/api/v1/courses", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_course_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/courses/4242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_courses_filters_by_status(pool: PgPool) {
    create_course(&pool).await;

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/courses?status=draft",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/courses?status=published",
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // An unknown status is a client error, not an empty result.
    let response = get(build_test_app(pool), "/api/v1/courses?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Workflow transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_approval_flow_over_http(pool: PgPool) {
    let id = create_course(&pool).await;

    // Submit: locked, pending review.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}/submit"),
        json!({ "actor": instructor_actor() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending_review");
    assert_eq!(json["data"]["is_locked"], true);
    assert_eq!(json["data"]["lock_reason"], "Under review");

    // Approve with notes: unlocked, decision recorded.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}/approve"),
        json!({ "actor": admin_actor(), "approval_notes": "Great work" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["is_locked"], false);
    assert_eq!(json["data"]["decision"], "approved");
    assert_eq!(json["data"]["approval_notes"], "Great work");

    // Publish.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}/publish"),
        json!({ "actor": instructor_actor() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "published");
    assert_eq!(json["data"]["is_published"], true);

    // Three transitions, three history entries.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}/history"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries[0]["action"], "published");
    assert_eq!(entries[2]["action"], "submitted");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_incomplete_course_returns_400(pool: PgPool) {
    let mut payload = complete_course_payload();
    payload["requirements"] = json!([]);
    let response = post_json(build_test_app(pool.clone()), "/api/v1/courses", payload).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}/submit"),
        json!({ "actor": instructor_actor() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("requirements"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_draft_returns_409(pool: PgPool) {
    let id = create_course(&pool).await;
    let status = transition(&pool, id, "approve", json!({ "actor": admin_actor() })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_requires_reason(pool: PgPool) {
    let id = create_course(&pool).await;
    transition(&pool, id, "submit", json!({ "actor": instructor_actor() })).await;

    let status = transition(
        &pool,
        id,
        "reject",
        json!({ "actor": admin_actor(), "reason": "  " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_owner_submit_returns_403(pool: PgPool) {
    let id = create_course(&pool).await;
    let status = transition(
        &pool,
        id,
        "submit",
        json!({ "actor": { "id": 99, "name": "Sam", "email": "sam@example.com" } }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_revision_flow_over_http(pool: PgPool) {
    let id = create_course(&pool).await;
    transition(&pool, id, "submit", json!({ "actor": instructor_actor() })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}/request-revision"),
        json!({ "actor": admin_actor(), "reason": "Add more examples" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "needs_revision");
    assert_eq!(json["data"]["rejection_reason"], "Add more examples");

    // The instructor can resubmit.
    let status = transition(&pool, id, "submit", json!({ "actor": instructor_actor() })).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_archive_over_http(pool: PgPool) {
    let id = create_course(&pool).await;
    let status = transition(&pool, id, "archive", json!({ "actor": instructor_actor() })).await;
    assert_eq!(status, StatusCode::OK);

    // Archiving twice is a conflict.
    let status = transition(&pool, id, "archive", json!({ "actor": instructor_actor() })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_minor_edit_over_http(pool: PgPool) {
    let id = create_course(&pool).await;

    let response = patch_json(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}"),
        json!({
            "actor": instructor_actor(),
            "changes": { "subtitle": "Now with async" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["edit_type"], "minor");
    assert_eq!(json["data"]["version"], 2);
    assert_eq!(json["data"]["subtitle"], "Now with async");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_major_edit_on_published_course_over_http(pool: PgPool) {
    let id = create_course(&pool).await;
    transition(&pool, id, "submit", json!({ "actor": instructor_actor() })).await;
    transition(&pool, id, "approve", json!({ "actor": admin_actor() })).await;
    transition(&pool, id, "publish", json!({ "actor": instructor_actor() })).await;

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/courses/{id}"),
        json!({
            "actor": instructor_actor(),
            "changes": { "description": "Completely rewritten" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["edit_type"], "major");
    assert_eq!(json["data"]["status"], "edited_pending");
    assert_eq!(json["data"]["is_published"], false);
    assert_eq!(json["data"]["lock_reason"], "Major changes require re-approval");

    // The pre-change snapshot is exposed under /versions.
    let response = get(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}/versions"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["status_at_snapshot"], "published");
    assert_eq!(json["data"][0]["snapshot"]["description"], "Ownership without tears");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_edit_returns_400(pool: PgPool) {
    let id = create_course(&pool).await;

    let response = patch_json(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}"),
        json!({ "actor": instructor_actor(), "changes": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_edit_locked_course_returns_409(pool: PgPool) {
    let id = create_course(&pool).await;
    transition(&pool, id, "submit", json!({ "actor": instructor_actor() })).await;

    let response = patch_json(
        build_test_app(pool),
        &format!("/api/v1/courses/{id}"),
        json!({ "actor": instructor_actor(), "changes": { "subtitle": "Sneaky" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
