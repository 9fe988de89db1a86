//! Ticket list view: search, priority filter, paging and local hiding.

mod model;

pub use model::{filter_label, ListState, ListViewModel, TicketCard};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use ticketdesk_core::{Priority, PriorityFilter, TicketQuery};

use crate::{ClientError, Debouncer, TicketsApi};

/// Quiet period after the last keystroke before a search is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

struct Shared<A> {
    api: A,
    state: RwLock<ListState>,
    /// Sequence number of the most recently initiated fetch
    issued: AtomicU64,
}

impl<A: TicketsApi> Shared<A> {
    /// Run a query and apply its result unless a newer fetch was started in
    /// the meantime. Returns whether the result was applied.
    async fn fetch(&self, query: TicketQuery) -> Result<bool, ClientError> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let page = match self.api.get_tickets(&query).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Fetching tickets failed: {}", e);
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if self.issued.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale response for page {}", query.page);
            return Ok(false);
        }
        state.apply(query, page);
        Ok(true)
    }
}

/// The ticket list, driven by user actions.
///
/// The view owns its state; nothing is process-global. Fetches that return
/// `Ok(false)` were superseded by a later fetch and left the state alone.
pub struct ListView<A> {
    shared: Arc<Shared<A>>,
    search_debounce: Debouncer,
}

impl<A: TicketsApi + 'static> ListView<A> {
    pub fn new(api: A) -> Self {
        Self::with_debounce(api, SEARCH_DEBOUNCE)
    }

    /// Create a view with a custom search debounce delay.
    pub fn with_debounce(api: A, delay: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                state: RwLock::new(ListState::default()),
                issued: AtomicU64::new(0),
            }),
            search_debounce: Debouncer::new(delay),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ListState {
        self.shared.state.read().await.clone()
    }

    /// View model for the current state.
    pub async fn view(&self) -> ListViewModel {
        self.shared.state.read().await.view()
    }

    /// Fetch the first page for the current search and filter.
    pub async fn load(&self) -> Result<bool, ClientError> {
        let query = self.current_query(1).await;
        self.shared.fetch(query).await
    }

    /// Record new search text. The query is sent once the text has been
    /// stable for the debounce delay, starting again from page 1.
    pub fn on_search(&self, text: impl Into<String>) {
        let shared = Arc::clone(&self.shared);
        let text = text.into();

        self.search_debounce.schedule(async move {
            let priority = shared.state.read().await.priority.clone();
            let query = TicketQuery::new().with_search(text).with_priority(priority);
            // Failures are already logged by fetch
            let _ = shared.fetch(query).await;
        });
    }

    /// Whether a debounced search is still waiting or in flight.
    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// Switch the priority filter. Always goes back to page 1.
    pub async fn select_priority(
        &self,
        priority: impl Into<PriorityFilter>,
    ) -> Result<bool, ClientError> {
        let query = self.current_query(1).await.with_priority(priority);
        self.shared.fetch(query).await
    }

    /// Show another page of the current search and filter.
    pub async fn go_to_page(&self, page: i64) -> Result<bool, ClientError> {
        let query = self.current_query(page).await;
        self.shared.fetch(query).await
    }

    /// Hide a ticket locally.
    pub async fn hide(&self, ticket_id: impl Into<String>) {
        self.shared.state.write().await.hidden.insert(ticket_id.into());
    }

    /// Bring back every hidden ticket.
    pub async fn restore(&self) {
        self.shared.state.write().await.hidden.clear();
    }

    /// Change a ticket's priority.
    ///
    /// The displayed ticket is updated first. If the server call fails the
    /// error is logged and returned, and the local change stays.
    pub async fn set_priority(&self, ticket_id: &str, priority: Priority) -> Result<(), ClientError> {
        self.shared
            .state
            .write()
            .await
            .set_ticket_priority(ticket_id, priority);

        self.shared
            .api
            .set_priority(ticket_id, priority)
            .await
            .inspect_err(|e| {
                warn!(
                    "Priority change for {} failed, keeping local value: {}",
                    ticket_id, e
                )
            })
    }

    async fn current_query(&self, page: i64) -> TicketQuery {
        let state = self.shared.state.read().await;
        TicketQuery::new()
            .with_search(state.search.clone())
            .with_priority(state.priority.clone())
            .with_page(page)
    }
}
