//! Integration tests for the webhook server
//!
//! Drive the real router through `tower::ServiceExt::oneshot` with mock
//! collaborators, covering the full status mapping and the
//! persistence-before-notification ordering.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot
use txnsift_extractor::{Extractor, ExtractorConfig};
use txnsift_llm::MockProvider;
use txnsift_mail::Normalizer;
use txnsift_server::handlers::{create_router, AppState};
use txnsift_sinks::{MockNotifier, MockStore};

const VALID_COMPLETION: &str = r#"{
    "date": "2021-12-31",
    "time": "4:35 PM ET",
    "amount": "$12.34",
    "account": "Checking (...123)",
    "merchant_raw": "SQ* SWEET GREEN CHICAGO",
    "merchant": "Sweet Green",
    "category": "Food & Dining"
}"#;

struct TestHarness {
    provider: MockProvider,
    store: MockStore,
    notifier: MockNotifier,
    app: axum::Router,
}

fn harness(provider: MockProvider, store: MockStore, notifier: MockNotifier) -> TestHarness {
    let state = AppState {
        extractor: Arc::new(Extractor::new(provider.clone(), ExtractorConfig::default())),
        store: Arc::new(store.clone()),
        notifier: Arc::new(notifier.clone()),
        normalizer: Arc::new(Normalizer::new()),
    };
    TestHarness {
        provider,
        store,
        notifier,
        app: create_router(state),
    }
}

fn default_harness() -> TestHarness {
    harness(
        MockProvider::new(VALID_COMPLETION),
        MockStore::new(),
        MockNotifier::new(),
    )
}

fn webhook_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/inbound-email")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_returns_plain_ack() {
    let h = default_harness();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = h.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_unparseable_json_is_415_with_no_outbound_calls() {
    let h = default_harness();

    let response = h.app.oneshot(webhook_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_text(response).await, "Unable to parse email");
    assert_eq!(h.provider.call_count(), 0);
    assert!(h.store.inserts().is_empty());
    assert!(h.notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_missing_both_bodies_is_400_with_no_outbound_calls() {
    let h = default_harness();

    let payload = r#"{
        "FromFull": {"Email": "alerts@bank.example", "Name": "Card Alerts"},
        "TextBody": "",
        "HtmlBody": ""
    }"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No text or html body found");
    assert_eq!(h.provider.call_count(), 0);
    assert!(h.store.inserts().is_empty());
    assert!(h.notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_absent_body_fields_also_400() {
    let h = default_harness();

    let payload = r#"{"FromFull": {"Email": "alerts@bank.example", "Name": ""}}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.provider.call_count(), 0);
}

// Scenario A: plain-text alert flows through extraction, persistence, and
// notification, responding 200.
#[tokio::test]
async fn test_text_alert_persisted_and_announced() {
    let h = default_harness();

    let payload = r#"{
        "FromFull": {"Email": "alerts@bank.example", "Name": "Card Alerts"},
        "TextBody": "SQ* SWEET GREEN CHICAGO  $12.34 on 12/31/21",
        "HtmlBody": ""
    }"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    // Normalized alert text reached the prompt (double space collapsed)
    let prompt = h.provider.last_prompt().unwrap();
    assert!(prompt.contains("SQ* SWEET GREEN CHICAGO $12.34 on 12/31/21"));

    let inserts = h.store.inserts();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].1.merchant, "Sweet Green");
    assert_eq!(inserts[0].1.category.as_str(), "Food & Dining");

    let notifications = h.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].merchant, "Sweet Green");
    assert_eq!(notifications[0].amount, "$12.34");
}

#[tokio::test]
async fn test_html_body_used_when_text_body_empty() {
    let h = default_harness();

    let payload = r#"{
        "FromFull": {"Email": "alerts@bank.example", "Name": "Card Alerts"},
        "TextBody": "",
        "HtmlBody": "<html><body><div style=\"display: none\">preheader junk</div><p>SQ* SWEET GREEN CHICAGO $12.34</p></body></html>"
    }"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let prompt = h.provider.last_prompt().unwrap();
    assert!(prompt.contains("SQ* SWEET GREEN CHICAGO $12.34"));
    assert!(!prompt.contains("preheader junk"));
}

// Scenario B: extraction fails on every attempt; sinks are never called.
#[tokio::test]
async fn test_extraction_failure_is_500_and_sinks_untouched() {
    let h = harness(
        MockProvider::failing("connection refused"),
        MockStore::new(),
        MockNotifier::new(),
    );

    let payload = r#"{"TextBody": "some alert", "HtmlBody": ""}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "NOT OK");
    assert!(h.store.inserts().is_empty());
    assert!(h.notifier.notifications().is_empty());
}

// Scenario C: the model's JSON is missing merchant_raw; persistence is
// never attempted.
#[tokio::test]
async fn test_schema_violation_is_500_and_nothing_persisted() {
    let h = harness(
        MockProvider::new(
            r#"{"date": "2021-12-31", "time": "4:35 PM ET", "amount": "$12.34",
                "account": "Checking", "merchant": "Sweet Green",
                "category": "Food & Dining"}"#,
        ),
        MockStore::new(),
        MockNotifier::new(),
    );

    let payload = r#"{"TextBody": "some alert", "HtmlBody": ""}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(h.provider.call_count(), 1);
    assert!(h.store.inserts().is_empty());
    assert!(h.notifier.notifications().is_empty());
}

// Scenario D: persistence fails; notification is never attempted.
#[tokio::test]
async fn test_persistence_failure_is_500_and_notification_skipped() {
    let h = harness(
        MockProvider::new(VALID_COMPLETION),
        MockStore::failing(),
        MockNotifier::new(),
    );

    let payload = r#"{"TextBody": "some alert", "HtmlBody": ""}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "NOT OK");
    assert!(h.notifier.notifications().is_empty());
}

// Notification failure never fails the request: the record is already
// persisted by then.
#[tokio::test]
async fn test_notification_failure_still_200() {
    let h = harness(
        MockProvider::new(VALID_COMPLETION),
        MockStore::new(),
        MockNotifier::failing(),
    );

    let payload = r#"{"TextBody": "some alert", "HtmlBody": ""}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
    assert_eq!(h.store.inserts().len(), 1);
}

#[tokio::test]
async fn test_invalid_category_from_model_is_500() {
    let h = harness(
        MockProvider::new(
            r#"{"date": "2021-12-31", "time": "4:35 PM ET", "amount": "$12.34",
                "account": "Checking", "merchant_raw": "SQ* SWEET GREEN",
                "merchant": "Sweet Green", "category": "Restaurant"}"#,
        ),
        MockStore::new(),
        MockNotifier::new(),
    );

    let payload = r#"{"TextBody": "some alert", "HtmlBody": ""}"#;
    let response = h.app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(h.store.inserts().is_empty());
}

#[tokio::test]
async fn test_trailer_marker_stripped_before_prompt() {
    let provider = MockProvider::new(VALID_COMPLETION);
    let state = AppState {
        extractor: Arc::new(Extractor::new(
            provider.clone(),
            ExtractorConfig::default(),
        )),
        store: Arc::new(MockStore::new()),
        notifier: Arc::new(MockNotifier::new()),
        normalizer: Arc::new(Normalizer::new().with_trailer_marker("To unsubscribe")),
    };
    let app = create_router(state);

    let payload = r#"{
        "TextBody": "SQ* SWEET GREEN CHICAGO $12.34\nTo unsubscribe, click here",
        "HtmlBody": ""
    }"#;
    let response = app.oneshot(webhook_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("SQ* SWEET GREEN CHICAGO $12.34"));
    assert!(!prompt.contains("unsubscribe"));
}
