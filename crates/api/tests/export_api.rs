//! HTTP-level integration tests for the streamed CSV export.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, create_project, get_auth, post_json_auth};
use sqlx::PgPool;

/// Annotate one row of a project via the API.
async fn submit(
    app: &axum::Router,
    token: &str,
    project_id: i64,
    annotation_id: serde_json::Value,
    category: &str,
    date: &str,
) {
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/annotations/{project_id}/submit"),
        token,
        serde_json::json!({ "annotation_id": annotation_id, "category": category, "date": date }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The export carries the original fields unchanged plus per-row annotation
/// and date, with empty strings for un-annotated rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_fidelity(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup_and_login(&app, "export@test.com").await;
    let csv = b"id,text\n1,first\n2,second\n3,third\n";
    let project_id = create_project(&app, &token, csv).await;

    let detail = body_json(
        get_auth(app.clone(), &format!("/api/v1/annotations/{project_id}"), &token).await,
    )
    .await;
    let rows = detail["rows"].as_array().unwrap().clone();
    submit(&app, &token, project_id, rows[0]["id"].clone(), "A", "2026-01-02T03:04:05Z").await;
    submit(&app, &token, project_id, rows[2]["id"].clone(), "B", "2026-01-03T09:30:00Z").await;

    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/annotations/{project_id}/export"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("attachment"));

    let body = body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4, "header + one line per data row");
    assert_eq!(lines[0], "id,text,annotation,date");
    assert_eq!(lines[1], "1,first,A,2026-01-02T03:04:05Z");
    assert_eq!(lines[2], "2,second,,");
    assert_eq!(lines[3], "3,third,B,2026-01-03T09:30:00Z");
}

/// Ingest -> annotate every row -> export round-trips every annotation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup_and_login(&app, "roundtrip@test.com").await;
    let csv = b"text\nhello\nworld\n";
    let project_id = create_project(&app, &token, csv).await;

    let detail = body_json(
        get_auth(app.clone(), &format!("/api/v1/annotations/{project_id}"), &token).await,
    )
    .await;
    let date = "2026-04-01T12:00:00Z";
    for row in detail["rows"].as_array().unwrap() {
        submit(&app, &token, project_id, row["id"].clone(), "V", date).await;
    }

    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/annotations/{project_id}/export"),
        &token,
    )
    .await;
    let body = body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in &lines[1..] {
        assert!(line.ends_with(&format!(",V,{date}")), "line: {line}");
    }
}

/// Export of a project whose source file disappeared fails cleanly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_with_missing_source_file(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::signup_and_login(&app, "lostfile@test.com").await;
    let project_id = create_project(&app, &token, b"text\nrow\n").await;

    for path in common::stored_paths(&pool, project_id).await {
        std::fs::remove_file(path).unwrap();
    }

    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/annotations/{project_id}/export"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ENCODING_UNDETECTABLE");
}

/// Exporting an unknown project id is NotFound.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_unknown_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup_and_login(&app, "unknown@test.com").await;

    let response = get_auth(app, "/api/v1/dashboard/annotations/999999/export", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
