//! Per-client rate limiting for the chat route.

use crate::api::client_ip::client_identifier;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::constants::RATE_LIMIT_MESSAGE;
use crate::core::RateLimitStatus;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{HeaderName, HeaderValue, RETRY_AFTER};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::warn;

pub const RATELIMIT_POLICY: HeaderName = HeaderName::from_static("ratelimit-policy");
pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Counts the request against the caller's quota before any body handling.
/// Rejected requests get a 429; every response carries the quota headers.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_identifier(request.headers(), peer, state.trust_proxy);
    let status = state.rate_limiter.check(&key);

    let mut response = if status.allowed {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for {} on {}", key, request.uri().path());
        let mut response = ApiError::RateLimited(RATE_LIMIT_MESSAGE.to_string()).into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(reset_seconds(&status)));
        response
    };

    apply_rate_limit_headers(response.headers_mut(), &status);
    response
}

/// Seconds until reset, rounded up so clients never retry early
fn reset_seconds(status: &RateLimitStatus) -> u64 {
    let reset = status.reset_after;
    reset.as_secs() + u64::from(reset.subsec_nanos() > 0)
}

fn apply_rate_limit_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    if let Ok(policy) =
        HeaderValue::from_str(&format!("{};w={}", status.limit, status.window.as_secs()))
    {
        headers.insert(RATELIMIT_POLICY, policy);
    }
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(status.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(status.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(reset_seconds(status)));
}
