//! Support tickets and their storage backends.

mod json_store;
mod memory_store;
mod store;
mod types;

pub use json_store::{read_tickets, JsonFileTicketStore};
pub use memory_store::MemoryTicketStore;
pub use store::{StoreError, TicketStore};
pub use types::{Priority, Ticket, UnknownPriority};

use tracing::info;

use crate::config::StorageConfig;

/// Factory function to create a ticket store from config
pub fn create_ticket_store(config: &StorageConfig) -> Result<Box<dyn TicketStore>, StoreError> {
    use crate::config::StorageBackend;

    match config.backend {
        StorageBackend::Json => {
            info!("Using JSON ticket file {:?}", config.path);
            Ok(Box::new(JsonFileTicketStore::open(&config.path)?))
        }
        StorageBackend::Memory => {
            info!("Using in-memory ticket store seeded from {:?}", config.path);
            Ok(Box::new(MemoryTicketStore::from_file(&config.path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    fn seed_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        let json = serde_json::to_string(&fixtures::tickets(4)).unwrap();
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_create_json_store_writes_back() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Json,
            path: seed_file(&dir),
        };
        let store = create_ticket_store(&config).unwrap();
        assert!(store.set_priority("t000", Priority::High).unwrap());

        let reread = read_tickets(&config.path).unwrap();
        assert_eq!(reread[0].priority, Priority::High);
    }

    #[test]
    fn test_create_memory_store_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            path: seed_file(&dir),
        };
        let store = create_ticket_store(&config).unwrap();
        assert_eq!(store.list().unwrap().len(), 4);
        assert!(store.set_priority("t000", Priority::High).unwrap());

        let reread = read_tickets(&config.path).unwrap();
        assert_eq!(reread[0].priority, Priority::None);
    }

    #[test]
    fn test_create_store_missing_file() {
        let config = StorageConfig {
            backend: StorageBackend::Json,
            path: "/nonexistent/data.json".into(),
        };
        assert!(create_ticket_store(&config).is_err());
    }
}
