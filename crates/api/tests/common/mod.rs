#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use aimode_api::config::{AppEnv, ServerConfig, DEFAULT_CORS_ORIGINS};
use aimode_api::router::build_app_router;
use aimode_api::state::AppState;
use aimode_core::pagination::Page;
use aimode_core::types::Timestamp;
use aimode_db::models::query_record::{NewQueryRecord, QueryRecord, TopQuery};
use aimode_db::store::QueryStore;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Peer address every test request appears to come from.
pub const TEST_PEER: ([u8; 4], u16) = ([203, 0, 113, 7], 41234);

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        cors_origins: DEFAULT_CORS_ORIGINS
            .split(',')
            .map(str::to_string)
            .collect(),
        environment: AppEnv::Production,
        trust_proxy: false,
    }
}

/// Build the full application router over `store` with the default test
/// config and a mocked peer address.
pub fn build_test_app(store: Arc<dyn QueryStore>) -> Router {
    build_test_app_with(store, test_config())
}

/// Same as [`build_test_app`] with an explicit config.
pub fn build_test_app_with(store: Arc<dyn QueryStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config),
    };
    build_app_router(state).layer(MockConnectInfo(SocketAddr::from(TEST_PEER)))
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A well-formed event body.
pub fn event(uid: &str, query: &str, ts: i64) -> serde_json::Value {
    serde_json::json!({
        "uid": uid,
        "query": query,
        "full_url": format!("https://www.google.com/search?q={query}&udm=50"),
        "ts": ts,
    })
}

/// A store whose every data operation fails as if the pool were exhausted.
pub struct FailingStore;

#[async_trait]
impl QueryStore for FailingStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn insert(&self, _record: &NewQueryRecord) -> Result<QueryRecord, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list_by_uid(&self, _uid: &str, _page: Page) -> Result<Vec<QueryRecord>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn count_by_uid(&self, _uid: &str) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list(
        &self,
        _search: Option<&str>,
        _page: Page,
    ) -> Result<Vec<QueryRecord>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn count(&self, _search: Option<&str>) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn count_distinct_uids(&self) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn count_created_since(&self, _since: Timestamp) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn top_queries(&self, _limit: i64) -> Result<Vec<TopQuery>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}
