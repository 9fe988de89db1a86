use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ticket::{Priority, Ticket};

/// Number of tickets per page.
pub const PAGE_SIZE: usize = 20;

/// Priority filter applied before text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    /// No priority filtering.
    #[default]
    All,
    /// Keep only tickets with this priority.
    Only(Priority),
    /// A value that is not a known priority. No ticket can carry it, so the
    /// filter matches nothing; it is kept rather than rejected.
    Unmatched(String),
}

impl PriorityFilter {
    /// Interpret a raw `priority` query parameter.
    ///
    /// Absent, empty and `"all"` all mean no filtering.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("") | Some("all") => PriorityFilter::All,
            Some(raw) => match raw.parse::<Priority>() {
                Ok(priority) => PriorityFilter::Only(priority),
                Err(_) => PriorityFilter::Unmatched(raw.to_string()),
            },
        }
    }

    /// The value sent as the `priority` query parameter.
    pub fn as_param(&self) -> &str {
        match self {
            PriorityFilter::All => "all",
            PriorityFilter::Only(priority) => priority.as_str(),
            PriorityFilter::Unmatched(raw) => raw,
        }
    }

    /// Whether a ticket passes this filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => ticket.priority == *priority,
            PriorityFilter::Unmatched(_) => false,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(priority: Priority) -> Self {
        PriorityFilter::Only(priority)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A list query: text search, priority filter and 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketQuery {
    pub search: String,
    pub priority: PriorityFilter,
    /// 1-based page. Zero and negative values are not rejected.
    pub page: i64,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            priority: PriorityFilter::All,
            page: 1,
        }
    }
}

impl TicketQuery {
    /// Create a query for the first page with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw request parameters, applying defaults.
    ///
    /// A page that is absent or does not parse as an integer becomes 1. This
    /// includes fractional input: `"2.5"` is page 1, not truncated to page 2
    /// and not used as a fractional slice offset.
    pub fn from_params(search: Option<&str>, priority: Option<&str>, page: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            priority: PriorityFilter::from_param(priority),
            page: page
                .and_then(|p| p.trim().parse::<i64>().ok())
                .unwrap_or(1),
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the priority filter.
    pub fn with_priority(mut self, priority: impl Into<PriorityFilter>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Set the page.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }
}

/// One page of query results plus aggregate counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    /// `ceil(overall_results / PAGE_SIZE)`.
    pub pages_number: usize,
    /// Number of tickets matching the filters, across all pages.
    pub overall_results: usize,
}
