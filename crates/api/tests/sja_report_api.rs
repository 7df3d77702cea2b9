//! Integration tests for `POST /api/v1/sja/{id}/pdf`.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_bytes, body_json, build_test_app, post_pdf, record, record_json, token_for};

// ---------------------------------------------------------------------------
// Test: stored record renders to a PDF attachment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stored_record_renders_pdf_attachment() {
    let app = build_test_app(vec![record(10, 1, "Boring i betong")]);
    let token = token_for(5, 1);

    let response = post_pdf(app, 10, Some(&token), "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("SJA-Boring_i_betong.pdf"));

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
    let pdf = String::from_utf8_lossy(&bytes);
    assert!(pdf.contains("Risk score: 20"));
    assert!(pdf.contains("High"));
    assert!(lopdf::Document::load_mem(&bytes).is_ok());
}

// ---------------------------------------------------------------------------
// Test: pre-hydrated record in the body is rendered without a lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn body_record_and_attachment_urls_are_rendered() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);
    let body = serde_json::json!({
        "record": record_json(11, 1, "Boring i betong"),
        "attachmentUrls": ["https://files.example.no/borekart.pdf"]
    });

    let response = post_pdf(app, 11, Some(&token), &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
    assert!(String::from_utf8_lossy(&bytes).contains("https://files.example.no/borekart.pdf"));
}

// ---------------------------------------------------------------------------
// Test: record of another company is forbidden
// ---------------------------------------------------------------------------

#[tokio::test]
async fn other_company_is_forbidden() {
    let app = build_test_app(vec![record(12, 2, "Boring i betong")]);
    let token = token_for(5, 1);

    let response = post_pdf(app, 12, Some(&token), "").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_ne!(response.headers()[CONTENT_TYPE], "application/pdf");
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn body_record_of_other_company_is_forbidden() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);
    let body = serde_json::json!({ "record": record_json(13, 2, "Boring i betong") });

    let response = post_pdf(app, 13, Some(&token), &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: missing or invalid session is unauthorized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = build_test_app(vec![record(14, 1, "Boring i betong")]);

    let response = post_pdf(app, 14, None, "").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = build_test_app(vec![record(15, 1, "Boring i betong")]);

    let response = post_pdf(app, 15, Some("not-a-jwt"), "").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: unknown record is not found
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_record_is_not_found() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);

    let response = post_pdf(app, 999, Some(&token), "{}").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Sja with id 999 not found");
}

// ---------------------------------------------------------------------------
// Test: invalid input is a bad request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_body_record_is_rejected() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);
    let mut invalid = record_json(16, 1, "Boring i betong");
    invalid["risks"][0]["probability"] = serde_json::json!(9);

    let body = serde_json::json!({ "record": invalid });
    let response = post_pdf(app, 16, Some(&token), &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);

    let response = post_pdf(app, 17, Some(&token), "{ not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn mismatched_record_id_is_bad_request() {
    let app = build_test_app(vec![]);
    let token = token_for(5, 1);
    let body = serde_json::json!({ "record": record_json(18, 1, "Boring i betong") });

    let response = post_pdf(app, 19, Some(&token), &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: malformed weather still yields a PDF
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_weather_still_renders() {
    let mut rec = record(20, 1, "Boring i betong");
    rec.location = Some("{ broken".into());
    let app = build_test_app(vec![rec]);
    let token = token_for(5, 1);

    let response = post_pdf(app, 20, Some(&token), "").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;
    assert!(String::from_utf8_lossy(&bytes).contains("Weather data could not be read"));
}
