//! Integration tests for `POST /api/ai-search`.

mod common;

use std::sync::Arc;

use aimode_core::hashing::ip_hash;
use aimode_core::query_event::MISSING_FIELDS_MESSAGE;
use aimode_db::store::MemoryQueryStore;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use common::{
    body_json, build_test_app, build_test_app_with, event, post_json, send, test_config,
    FailingStore,
};
use serde_json::json;

const UID: &str = "u-1234567890abcdef";
const TS_MS: i64 = 1_760_000_000_000;

// ---------------------------------------------------------------------------
// Test: a valid event is stored and acknowledged with 201
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_event_returns_201_with_id_and_timestamp() {
    let store = Arc::new(MemoryQueryStore::new());
    let before = Utc::now();

    let response = post_json(
        build_test_app(store.clone()),
        "/api/ai-search",
        event(UID, "rust async traits", TS_MS),
    )
    .await;
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["id"].is_i64());

    let created: DateTime<Utc> = json["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(before <= created && created <= after);

    let records = store.snapshot().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(json["id"], record.id);
    assert_eq!(record.uid, UID);
    assert_eq!(record.query, "rust async traits");
    assert_eq!(record.timestamp, Utc.timestamp_millis_opt(TS_MS).unwrap());
    assert_eq!(record.created_at, created);
}

#[tokio::test]
async fn stored_event_carries_hash_of_peer_address() {
    let store = Arc::new(MemoryQueryStore::new());
    post_json(
        build_test_app(store.clone()),
        "/api/ai-search",
        event(UID, "cats", TS_MS),
    )
    .await;

    let records = store.snapshot().await;
    let hash = records[0].ip_hash.clone().expect("ip hash should be set");
    assert_eq!(hash.len(), 16);
    assert_eq!(Some(hash), ip_hash(Some("203.0.113.7")));
}

#[tokio::test]
async fn forwarded_for_is_used_only_behind_trusted_proxy() {
    let request = || {
        Request::builder()
            .method(Method::POST)
            .uri("/api/ai-search")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", "198.51.100.4, 10.0.0.1")
            .body(Body::from(event(UID, "cats", TS_MS).to_string()))
            .unwrap()
    };

    let direct = Arc::new(MemoryQueryStore::new());
    send(build_test_app(direct.clone()), request()).await;
    assert_eq!(
        direct.snapshot().await[0].ip_hash,
        ip_hash(Some("203.0.113.7"))
    );

    let proxied = Arc::new(MemoryQueryStore::new());
    let mut config = test_config();
    config.trust_proxy = true;
    send(build_test_app_with(proxied.clone(), config), request()).await;
    assert_eq!(
        proxied.snapshot().await[0].ip_hash,
        ip_hash(Some("198.51.100.4"))
    );
}

#[tokio::test]
async fn query_text_is_trimmed_before_storage() {
    let store = Arc::new(MemoryQueryStore::new());
    let response = post_json(
        build_test_app(store.clone()),
        "/api/ai-search",
        event(UID, "  spaced out  ", TS_MS),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.snapshot().await[0].query, "spaced out");
}

#[tokio::test]
async fn iso_string_timestamp_is_accepted() {
    let store = Arc::new(MemoryQueryStore::new());
    let mut body = event(UID, "cats", TS_MS);
    body["ts"] = json!("2025-10-09T08:53:20Z");

    let response = post_json(build_test_app(store.clone()), "/api/ai-search", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        store.snapshot().await[0].timestamp,
        Utc.with_ymd_and_hms(2025, 10, 9, 8, 53, 20).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test: missing or invalid fields are rejected and nothing is stored
// ---------------------------------------------------------------------------

#[tokio::test]
async fn each_missing_field_is_rejected() {
    for field in ["uid", "query", "full_url", "ts"] {
        let store = Arc::new(MemoryQueryStore::new());
        let mut body = event(UID, "cats", TS_MS);
        body.as_object_mut().unwrap().remove(field);

        let response = post_json(build_test_app(store.clone()), "/api/ai-search", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field: {field}");
        assert_eq!(body_json(response).await["error"], MISSING_FIELDS_MESSAGE);
        assert!(store.snapshot().await.is_empty(), "field: {field}");
    }
}

#[tokio::test]
async fn empty_string_field_is_rejected() {
    let store = Arc::new(MemoryQueryStore::new());
    let mut body = event(UID, "cats", TS_MS);
    body["full_url"] = json!("");

    let response = post_json(build_test_app(store.clone()), "/api/ai-search", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], MISSING_FIELDS_MESSAGE);
    assert!(store.snapshot().await.is_empty());
}

#[tokio::test]
async fn unparseable_timestamp_is_rejected() {
    let store = Arc::new(MemoryQueryStore::new());
    let mut body = event(UID, "cats", TS_MS);
    body["ts"] = json!("yesterday-ish");

    let response = post_json(build_test_app(store.clone()), "/api/ai-search", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid ts value");
    assert!(store.snapshot().await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let store = Arc::new(MemoryQueryStore::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ai-search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"uid\": "))
        .unwrap();

    let response = send(build_test_app(store.clone()), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert!(store.snapshot().await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: store faults become 500 without leaking detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_generic_500() {
    let response = post_json(
        build_test_app(Arc::new(FailingStore)),
        "/api/ai-search",
        event(UID, "cats", TS_MS),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to store query");
    assert_eq!(json["message"], "Something went wrong");
}
