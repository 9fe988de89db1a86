//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the ticketdesk server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Priority change requests by outcome, and changes applied per priority
//! - Ticket counts by priority (collected on scrape)

use std::time::Instant;

use axum::http::{Method, StatusCode};
use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use tracing::warn;

use ticketdesk_core::Priority;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ticketdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "ticketdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Priority changes that found their ticket, by new priority.
pub static PRIORITY_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketdesk_priority_changes_total",
            "Ticket priority changes applied",
        ),
        &["priority"],
    )
    .unwrap()
});

/// Priority change requests by outcome: `accepted`, `rejected` or `failed`.
pub static PRIORITY_CHANGE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketdesk_priority_change_requests_total",
            "Priority change requests by outcome",
        ),
        &["outcome"],
    )
    .unwrap()
});

/// Tickets by current priority (collected dynamically).
pub static TICKETS_BY_PRIORITY: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "ticketdesk_tickets_by_priority",
            "Current ticket count by priority",
        ),
        &["priority"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Tickets
    registry
        .register(Box::new(PRIORITY_CHANGES_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(PRIORITY_CHANGE_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(TICKETS_BY_PRIORITY.clone()))
        .unwrap();
}

// =============================================================================
// Recording
// =============================================================================

/// Tracks one HTTP request from arrival to response.
///
/// The in-flight gauge is raised on `start` and lowered on drop, so a request
/// whose future is cancelled before `finish` still leaves the gauge balanced.
pub struct RequestTimer {
    method: String,
    path: String,
    started: Instant,
}

impl RequestTimer {
    pub fn start(method: &Method, path: &str) -> Self {
        HTTP_REQUESTS_IN_FLIGHT.inc();
        Self {
            method: method.to_string(),
            path: normalize_path(path),
            started: Instant::now(),
        }
    }

    /// Record duration and count under the response status.
    pub fn finish(self, status: StatusCode) {
        let status = status.as_u16().to_string();
        let labels = [self.method.as_str(), self.path.as_str(), status.as_str()];

        HTTP_REQUEST_DURATION
            .with_label_values(&labels)
            .observe(self.started.elapsed().as_secs_f64());
        HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        HTTP_REQUESTS_IN_FLIGHT.dec();
    }
}

/// Outcome label for a priority change response.
pub fn priority_change_outcome(status: StatusCode) -> &'static str {
    if status.is_success() {
        "accepted"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "failed"
    }
}

pub fn record_priority_change_outcome(status: StatusCode) {
    PRIORITY_CHANGE_REQUESTS_TOTAL
        .with_label_values(&[priority_change_outcome(status)])
        .inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the priority gauges reflect the store as it is
/// at scrape time.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let tickets = match state.ticket_store().list() {
        Ok(tickets) => tickets,
        Err(e) => {
            warn!("Skipping ticket metrics, store unreadable: {}", e);
            return;
        }
    };

    for priority in Priority::ALL {
        let count = tickets.iter().filter(|t| t.priority == priority).count();
        TICKETS_BY_PRIORITY
            .with_label_values(&[priority.as_str()])
            .set(count as i64);
    }
}

/// Normalize a path for metric labels.
///
/// API and metrics paths are kept as-is; anything else is a static asset and
/// collapses into one label so the label set stays bounded.
pub fn normalize_path(path: &str) -> String {
    if path == "/metrics" || path == "/api" || path.starts_with("/api/") {
        path.to_string()
    } else {
        "/{static}".to_string()
    }
}
