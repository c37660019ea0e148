//! Custom extractors shared by the query handlers.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejections are shaped as [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Network address of the caller, when known.
///
/// This is the socket peer address, or the first `X-Forwarded-For` entry when
/// `TRUST_PROXY` is enabled. IPv4-mapped IPv6 peers are reported as IPv4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAddress(pub Option<String>);

impl FromRequestParts<AppState> for CallerAddress {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.config.trust_proxy {
            if let Some(forwarded) = first_forwarded_for(&parts.headers) {
                return Ok(CallerAddress(Some(forwarded)));
            }
        }

        let peer = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr.ip().to_canonical().to_string());

        Ok(CallerAddress(peer))
    }
}

fn first_forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
