//! Client side of the ticket desk: HTTP API access and the ticket list view.

pub mod api;
pub mod debounce;
mod error;
pub mod testing;
pub mod view;

pub use api::{HttpTicketsApi, TicketsApi, DEFAULT_BASE_URL};
pub use debounce::Debouncer;
pub use error::ClientError;
pub use view::{ListState, ListView, ListViewModel, TicketCard, SEARCH_DEBOUNCE};
