use std::num::NonZeroU32;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use governor::{DefaultDirectRateLimiter, Quota};
use serde_json::json;

/// Request budget shared by every request passing the layer.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<DefaultDirectRateLimiter>,
}

impl RateLimiter {
    /// `rps` requests per second with a burst of the same size; zero is treated as one.
    pub fn new(rps: u32) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        Self {
            inner: Arc::new(governor::RateLimiter::direct(Quota::per_second(rps))),
        }
    }

    fn allow(&self) -> bool {
        self.inner.check().is_ok()
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.allow() {
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Rate limit exceeded" })),
        )
            .into_response();
    }
    next.run(req).await
}
