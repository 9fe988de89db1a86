//! Request metrics for the HTTP surface.

use axum::{
    body::Body,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};

use crate::metrics::{record_priority_change_outcome, RequestTimer};

/// Path of the priority update endpoint as seen by the outer router.
const CHANGE_PRIORITY_PATH: &str = "/api/tickets/changePriority";

/// Time every request and count priority change requests by outcome.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let priority_change =
        request.method() == Method::PUT && request.uri().path() == CHANGE_PRIORITY_PATH;
    let timer = RequestTimer::start(request.method(), request.uri().path());

    let response = next.run(request).await;

    timer.finish(response.status());
    if priority_change {
        record_priority_change_outcome(response.status());
    }

    response
}
