use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Cross-origin access for the JSON API. Forms are same-origin and unaffected.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any)
}
