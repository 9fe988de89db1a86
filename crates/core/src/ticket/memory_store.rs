//! In-memory ticket store.

use std::path::Path;
use std::sync::RwLock;

use super::{json_store::read_tickets, Priority, StoreError, Ticket, TicketStore};

/// Ticket store holding the collection in memory. Updates are lost on exit.
pub struct MemoryTicketStore {
    tickets: RwLock<Vec<Ticket>>,
}

impl MemoryTicketStore {
    /// Create a store over the given tickets.
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: RwLock::new(tickets),
        }
    }

    /// Create a store seeded from a JSON ticket file. The file is not written back.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(read_tickets(path)?))
    }
}

impl TicketStore for MemoryTicketStore {
    fn list(&self) -> Result<Vec<Ticket>, StoreError> {
        let tickets = self.tickets.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tickets.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Ticket>, StoreError> {
        let tickets = self.tickets.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    fn set_priority(&self, id: &str, priority: Priority) -> Result<bool, StoreError> {
        let mut tickets = self.tickets.write().map_err(|_| StoreError::Poisoned)?;
        match tickets.iter_mut().find(|t| t.id == id) {
            Some(ticket) => {
                ticket.priority = priority;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_set_priority_updates_in_place() {
        let mut t1 = fixtures::ticket("t1", "Login broken");
        t1.priority = Priority::Low;
        let store = MemoryTicketStore::new(vec![t1]);

        assert!(store.set_priority("t1", Priority::High).unwrap());
        assert_eq!(store.get("t1").unwrap().unwrap().priority, Priority::High);
    }

    #[test]
    fn test_set_priority_unknown_id() {
        let store = MemoryTicketStore::new(fixtures::tickets(2));
        assert!(!store.set_priority("missing", Priority::Low).unwrap());
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let result = MemoryTicketStore::from_file(Path::new("/nonexistent/data.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
