//! Ticket API handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use ticketdesk_core::{run_query, Priority, StoreError, TicketPage, TicketQuery};

use crate::metrics::PRIORITY_CHANGES_TOTAL;
use crate::state::AppState;

/// Body sent by the priority change endpoint, whatever the status code.
///
/// Existing clients only look at the status; a 400 still carries this body.
pub const ACK_BODY: &str = "OK";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing tickets.
///
/// Kept as raw strings so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListTicketsParams {
    /// Free-text search
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// `all`, `low`, `none` or `high`
    pub priority: Option<String>,
}

/// Request body for changing a ticket's priority
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePriorityBody {
    pub ticket_id: Option<String>,
    pub priority: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
}

fn store_failure(e: StoreError) -> (StatusCode, Json<TicketErrorResponse>) {
    error!("Ticket store failure: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(TicketErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// List tickets with search, priority filter and pagination
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTicketsParams>,
) -> Result<Json<TicketPage>, (StatusCode, Json<TicketErrorResponse>)> {
    let query = TicketQuery::from_params(
        params.search.as_deref(),
        params.priority.as_deref(),
        params.page.as_deref(),
    );

    let tickets = state.ticket_store().list().map_err(store_failure)?;
    let page = run_query(&tickets, &query);

    debug!(
        search = %query.search,
        priority = %query.priority,
        page = query.page,
        overall_results = page.overall_results,
        "Listed tickets"
    );

    Ok(Json(page))
}

/// Change a ticket's priority
///
/// Both fields must be present and non-empty, otherwise the answer is 400.
/// An unknown ticket id is still answered with 200.
///
/// Unlike a presence-only check, a priority other than `low`, `none` or
/// `high` is also answered with 400, since stored priorities are typed.
/// The body is `"OK"` in every case except a store failure.
pub async fn change_priority(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let body: ChangePriorityBody = serde_json::from_slice(&body).unwrap_or_default();

    let (Some(ticket_id), Some(priority)) = (non_empty(body.ticket_id), non_empty(body.priority))
    else {
        debug!("Rejecting priority change with missing ticketId or priority");
        return (StatusCode::BAD_REQUEST, ACK_BODY).into_response();
    };

    let priority = match priority.parse::<Priority>() {
        Ok(priority) => priority,
        Err(e) => {
            warn!("Rejecting priority change for {}: {}", ticket_id, e);
            return (StatusCode::BAD_REQUEST, ACK_BODY).into_response();
        }
    };

    match state.ticket_store().set_priority(&ticket_id, priority) {
        Ok(true) => {
            info!("Ticket {} priority set to {}", ticket_id, priority);
            PRIORITY_CHANGES_TOTAL
                .with_label_values(&[priority.as_str()])
                .inc();
            (StatusCode::OK, ACK_BODY).into_response()
        }
        Ok(false) => {
            debug!("Priority change for unknown ticket {}", ticket_id);
            (StatusCode::OK, ACK_BODY).into_response()
        }
        Err(e) => store_failure(e).into_response(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
