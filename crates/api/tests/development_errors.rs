//! Error bodies when the server runs with `APP_ENV=development`.
//!
//! Detail exposure is fixed once per process, so these tests live in their
//! own test binary.

mod common;

use std::sync::Arc;

use aimode_api::config::AppEnv;
use aimode_api::error::set_expose_details;
use axum::http::StatusCode;
use common::{body_json, build_test_app_with, event, get, post_json, test_config, FailingStore};

fn development_app() -> axum::Router {
    assert!(set_expose_details(true));
    let mut config = test_config();
    config.environment = AppEnv::Development;
    build_test_app_with(Arc::new(FailingStore), config)
}

#[tokio::test]
async fn store_fault_detail_is_returned_in_development() {
    let response = post_json(
        development_app(),
        "/api/ai-search",
        event("u-1234567890abcdef", "cats", 1_760_000_000_000),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to store query");
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("pool timed out"));
}

#[tokio::test]
async fn validation_errors_are_unchanged_in_development() {
    let response = get(development_app(), "/api/queries/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Valid uid parameter is required"
    );
}

#[test]
fn exposure_cannot_be_switched_once_set() {
    assert!(set_expose_details(true));
    assert!(!set_expose_details(false));
}
