//! Search, priority filtering and pagination over a ticket collection.

mod engine;
mod types;

pub use engine::run_query;
pub use types::{PriorityFilter, TicketPage, TicketQuery, PAGE_SIZE};
