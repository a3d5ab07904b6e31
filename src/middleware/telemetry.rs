use axum::extract::{MatchedPath, Request};
use axum::http::header::USER_AGENT;
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Gives every request a UUIDv7 so request ids are sortable by time.
#[derive(Default, Clone)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        Uuid::now_v7().to_string().parse().ok().map(RequestId::new)
    }
}

#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<RequestIdGenerator> {
    SetRequestIdLayer::new(HeaderName::from_static("x-request-id"), RequestIdGenerator)
}

/// Wraps the request in an `http.request` span and logs its outcome.
pub async fn trace_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();

    // Matched routes keep the cardinality of `http.target` low
    // since ids are left out.
    let target = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str)
        .to_string();

    // set by `SetRequestIdLayer` further out
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
        .to_string();

    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let span = tracing::info_span!(
        "http.request",
        http.method = %method,
        http.status_code = tracing::field::Empty,
        http.target = %target,
        http.user_agent = %user_agent,
        request.duration = tracing::field::Empty,
        request.id = %request_id,
    );

    span.in_scope(|| debug!("Processing request: {method} {target}"));

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed = start.elapsed();

    let status = response.status();
    span.record("http.status_code", status.as_u16());
    span.record("request.duration", tracing::field::debug(elapsed));
    span.in_scope(|| {
        if status.is_server_error() {
            warn!("{method} {target} -> {status} ({elapsed:?})");
        } else {
            info!("{method} {target} -> {status} ({elapsed:?})");
        }
    });

    response
}
