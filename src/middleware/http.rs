//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applied once around the whole gateway, including static assets.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits (shared by the JSON and urlencoded body parsers)
//! - Global timeouts

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::{Response, StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::HttpSettings;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router, settings: &HttpSettings) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let log_4xx = settings.log_4xx_responses;

    // 5xx are reported by the default failure classifier; 4xx only on request.
    let trace = TraceLayer::new_for_http().on_response(
        move |res: &Response<Body>, latency: Duration, _span: &Span| {
            let status = res.status();
            if status.is_client_error() {
                if log_4xx {
                    tracing::warn!(%status, ?latency, "client error response");
                }
            } else {
                tracing::debug!(%status, ?latency, "finished processing request");
            }
        },
    );

    // Outer to inner: request id, access log, error mapping, timeout, body limit.
    // Timeout/limit errors become responses inside the request-id and trace layers.
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(trace)
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        // axum's extractors otherwise cap bodies at 2 MiB regardless of the limit above
        .layer(DefaultBodyLimit::disable());

    router.layer(layers)
}
