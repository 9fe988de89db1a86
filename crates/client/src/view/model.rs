use std::collections::HashSet;

use ticketdesk_core::{Priority, PriorityFilter, Ticket, TicketPage, TicketQuery};

/// Client-side state of the ticket list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Search text of the last applied query
    pub search: String,
    /// Priority filter of the last applied query
    pub priority: PriorityFilter,
    /// Page of the last applied query
    pub page: i64,
    /// Current page of tickets, `None` until the first response arrives
    pub tickets: Option<Vec<Ticket>>,
    pub pages_number: usize,
    pub overall_results: usize,
    /// Ticket ids hidden locally. Never sent to the server.
    pub hidden: HashSet<String>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            priority: PriorityFilter::All,
            page: 1,
            tickets: None,
            pages_number: 0,
            overall_results: 0,
            hidden: HashSet::new(),
        }
    }
}

impl ListState {
    /// Replace the displayed page with a server response and remember the
    /// query that produced it.
    pub fn apply(&mut self, query: TicketQuery, page: TicketPage) {
        self.search = query.search;
        self.priority = query.priority;
        self.page = query.page;
        self.tickets = Some(page.tickets);
        self.pages_number = page.pages_number;
        self.overall_results = page.overall_results;
    }

    /// Overwrite the priority of a displayed ticket. Returns whether it was shown.
    pub fn set_ticket_priority(&mut self, ticket_id: &str, priority: Priority) -> bool {
        let mut found = false;
        for ticket in self.tickets.iter_mut().flatten() {
            if ticket.id == ticket_id {
                ticket.priority = priority;
                found = true;
            }
        }
        found
    }

    /// Build the view model for the current state.
    pub fn view(&self) -> ListViewModel {
        let cards = self
            .tickets
            .iter()
            .flatten()
            .filter(|t| !self.hidden.contains(&t.id))
            .map(TicketCard::from)
            .collect();

        ListViewModel {
            results_title: self.tickets.as_ref().map(|_| self.results_title()),
            cards,
            page_buttons: (1..=self.pages_number).collect(),
            current_page: self.page,
            hidden_count: self.hidden.len(),
        }
    }

    fn results_title(&self) -> String {
        let mut title = format!(
            "Showing {} results ({})",
            self.overall_results,
            filter_label(&self.priority)
        );
        if !self.hidden.is_empty() {
            title.push_str(&format!(" ({} hidden tickets - restore)", self.hidden.len()));
        }
        title
    }
}

/// Human label for a priority filter, as shown in the results header.
pub fn filter_label(filter: &PriorityFilter) -> &'static str {
    match filter {
        PriorityFilter::All => "all",
        PriorityFilter::Only(Priority::High) => "high priority",
        PriorityFilter::Only(Priority::Low) => "low priority",
        PriorityFilter::Only(Priority::None) | PriorityFilter::Unmatched(_) => "no priority",
    }
}

/// Everything needed to draw the list, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel {
    /// `None` while the first page is loading
    pub results_title: Option<String>,
    /// Visible tickets, with hidden ones removed
    pub cards: Vec<TicketCard>,
    /// One button per page, 1-based
    pub page_buttons: Vec<usize>,
    pub current_page: i64,
    pub hidden_count: usize,
}

impl ListViewModel {
    pub fn is_loading(&self) -> bool {
        self.results_title.is_none()
    }
}

/// A single rendered ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketCard {
    pub id: String,
    pub title: String,
    pub content: String,
    pub labels: Vec<String>,
    /// Author and creation time line
    pub meta: String,
    pub priority: Priority,
}

impl From<&Ticket> for TicketCard {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            title: ticket.title.clone(),
            content: ticket.content.clone(),
            labels: ticket.labels.clone().unwrap_or_default(),
            meta: format!(
                "By {} | {}",
                ticket.user_email,
                ticket.creation_time.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            priority: ticket.priority,
        }
    }
}
