//! Origin allow-list with `*` wildcards.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for the configured origin patterns.
///
/// Only GET and POST are allowed. `Authorization` is accepted as a header
/// even though no endpoint checks it.
pub fn build_cors_layer(patterns: &[String]) -> CorsLayer {
    let patterns: Arc<[String]> = patterns.into();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| patterns.iter().any(|p| origin_matches(p, origin)))
            },
        ))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Match an origin against a pattern where `*` stands for any run of
/// characters other than `/`.
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    let mut segments = pattern.split('*');
    let Some(first) = segments.next() else {
        return false;
    };
    let Some(mut rest) = origin.strip_prefix(first) else {
        return false;
    };

    let segments: Vec<&str> = segments.collect();
    let Some((last, middle)) = segments.split_last() else {
        // No wildcard: exact match.
        return rest.is_empty();
    };

    for segment in middle {
        let Some(pos) = rest.find(segment) else {
            return false;
        };
        if rest[..pos].contains('/') {
            return false;
        }
        rest = &rest[pos + segment.len()..];
    }

    rest.len() >= last.len()
        && rest.ends_with(last)
        && !rest[..rest.len() - last.len()].contains('/')
}
