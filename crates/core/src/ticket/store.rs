//! Ticket storage trait and error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::ticket::{Priority, Ticket};

/// Error type for ticket storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a valid ticket array.
    #[error("Failed to parse tickets from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The ticket collection could not be serialized.
    #[error("Failed to serialize tickets: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Ticket store lock poisoned")]
    Poisoned,
}

/// Trait for ticket storage backends.
///
/// The collection is seeded externally; tickets are never created or deleted
/// through this interface.
pub trait TicketStore: Send + Sync {
    /// Return every ticket, in stored order.
    fn list(&self) -> Result<Vec<Ticket>, StoreError>;

    /// Get a ticket by ID.
    fn get(&self, id: &str) -> Result<Option<Ticket>, StoreError> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    /// Overwrite a ticket's priority and persist the collection.
    ///
    /// Returns `Ok(false)` when no ticket has the given id; that case is not
    /// an error.
    fn set_priority(&self, id: &str, priority: Priority) -> Result<bool, StoreError>;
}
