//! In-memory [`TicketsApi`] for exercising the list view without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use ticketdesk_core::{run_query, Priority, Ticket, TicketPage, TicketQuery};

use crate::{ClientError, TicketsApi};

/// Mock API answering queries from a fixed ticket list.
///
/// Every request is recorded. Delays pushed with [`push_delay`](Self::push_delay)
/// are consumed one per `get_tickets` call, in call order.
#[derive(Default)]
pub struct MockTicketsApi {
    tickets: Mutex<Vec<Ticket>>,
    requests: Mutex<Vec<TicketQuery>>,
    priority_calls: Mutex<Vec<(String, Priority)>>,
    delays: Mutex<VecDeque<Duration>>,
    fail_get_tickets: AtomicBool,
    fail_set_priority: AtomicBool,
}

impl MockTicketsApi {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: Mutex::new(tickets),
            ..Default::default()
        }
    }

    /// Queries received so far.
    pub fn requests(&self) -> Vec<TicketQuery> {
        self.requests.lock().unwrap().clone()
    }

    /// Priority changes received so far.
    pub fn priority_calls(&self) -> Vec<(String, Priority)> {
        self.priority_calls.lock().unwrap().clone()
    }

    /// Delay the next unanswered `get_tickets` call.
    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn fail_get_tickets(&self, fail: bool) {
        self.fail_get_tickets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set_priority(&self, fail: bool) {
        self.fail_set_priority.store(fail, Ordering::SeqCst);
    }

    fn unavailable() -> ClientError {
        ClientError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        }
    }
}

#[async_trait]
impl TicketsApi for MockTicketsApi {
    async fn get_tickets(&self, query: &TicketQuery) -> Result<TicketPage, ClientError> {
        self.requests.lock().unwrap().push(query.clone());
        let delay = self.delays.lock().unwrap().pop_front();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_get_tickets.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let tickets = self.tickets.lock().unwrap();
        Ok(run_query(&tickets, query))
    }

    async fn set_priority(&self, ticket_id: &str, priority: Priority) -> Result<(), ClientError> {
        self.priority_calls
            .lock()
            .unwrap()
            .push((ticket_id.to_string(), priority));

        if self.fail_set_priority.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }

        let mut tickets = self.tickets.lock().unwrap();
        if let Some(ticket) = tickets.iter_mut().find(|t| t.id == ticket_id) {
            ticket.priority = priority;
        }
        Ok(())
    }
}
