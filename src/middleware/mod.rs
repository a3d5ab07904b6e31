use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

use crate::config;

pub mod panic;
pub mod telemetry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// room for the other multipart fields and boundaries
const BODY_LIMIT_SLACK: usize = 64 * 1024;

pub fn apply(router: Router, config: &config::Server) -> Router {
    let body_limit = config.media.max_size.saturating_add(BODY_LIMIT_SLACK);
    let middleware = ServiceBuilder::new()
        .layer(self::telemetry::set_request_id_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(self::telemetry::trace_request))
        .layer(CatchPanicLayer::custom(self::panic::catch_panic));

    router
        .layer(middleware)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyTimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::max(body_limit))
}
