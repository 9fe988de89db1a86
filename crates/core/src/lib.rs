pub mod config;
pub mod query;
pub mod testing;
pub mod ticket;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, ServerConfig, StorageBackend, StorageConfig,
};
pub use query::{run_query, PriorityFilter, TicketPage, TicketQuery, PAGE_SIZE};
pub use ticket::{
    create_ticket_store, read_tickets, JsonFileTicketStore, MemoryTicketStore, Priority,
    StoreError, Ticket, TicketStore, UnknownPriority,
};
