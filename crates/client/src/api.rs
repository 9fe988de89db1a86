//! Client for the ticket HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use ticketdesk_core::{Priority, TicketPage, TicketQuery};

use crate::ClientError;

/// Base URL of a locally running server with the default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3232";

/// Operations the list view needs from the backend.
#[async_trait]
pub trait TicketsApi: Send + Sync {
    /// Fetch one page of tickets matching the query.
    async fn get_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ClientError>;

    /// Change a ticket's priority.
    async fn set_priority(&self, ticket_id: &str, priority: Priority) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: TicketsApi + ?Sized> TicketsApi for Arc<T> {
    async fn get_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ClientError> {
        (**self).get_tickets(query).await
    }

    async fn set_priority(&self, ticket_id: &str, priority: Priority) -> Result<(), ClientError> {
        (**self).set_priority(ticket_id, priority).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePriorityRequest<'a> {
    ticket_id: &'a str,
    priority: Priority,
}

/// [`TicketsApi`] over HTTP.
pub struct HttpTicketsApi {
    client: Client,
    base_url: String,
}

impl HttpTicketsApi {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:3232`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpTicketsApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl TicketsApi for HttpTicketsApi {
    async fn get_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ClientError> {
        let url = format!("{}/api/tickets", self.base_url);
        let page = query.page.to_string();

        debug!(
            search = %query.search,
            priority = %query.priority,
            page = query.page,
            "Fetching tickets"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("search", query.search.as_str()),
                ("page", page.as_str()),
                ("priority", query.priority.as_param()),
            ])
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn set_priority(&self, ticket_id: &str, priority: Priority) -> Result<(), ClientError> {
        let url = format!("{}/api/tickets/changePriority", self.base_url);

        debug!("Setting priority of {} to {}", ticket_id, priority);

        let response = self
            .client
            .put(&url)
            .json(&ChangePriorityRequest {
                ticket_id,
                priority,
            })
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpTicketsApi::new("http://localhost:3232/");
        assert_eq!(api.base_url(), "http://localhost:3232");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(HttpTicketsApi::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_change_priority_request_shape() {
        let value = serde_json::to_value(ChangePriorityRequest {
            ticket_id: "t1",
            priority: Priority::High,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "ticketId": "t1", "priority": "high" }));
    }
}
