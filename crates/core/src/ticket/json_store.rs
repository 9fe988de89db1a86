//! JSON-file backed ticket store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use super::{Priority, StoreError, Ticket, TicketStore};

/// Ticket store backed by a single JSON file holding an array of tickets.
///
/// Reads parse the file every time under the shared side of `file_lock`.
/// Priority updates hold the exclusive side for the whole read-modify-write,
/// so no reader sees a partially rewritten file and no two updates interleave.
pub struct JsonFileTicketStore {
    path: PathBuf,
    file_lock: RwLock<()>,
}

impl JsonFileTicketStore {
    /// Open a store over an existing data file.
    ///
    /// The file is parsed once up front so a broken seed fails at startup
    /// instead of on the first request.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            file_lock: RwLock::new(()),
        };
        let count = store.read_all()?.len();
        debug!("Opened ticket file {:?} with {} tickets", store.path, count);
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Ticket>, StoreError> {
        read_tickets(&self.path)
    }

    fn write_all(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        let json = serde_json::to_string(tickets).map_err(StoreError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl TicketStore for JsonFileTicketStore {
    fn list(&self) -> Result<Vec<Ticket>, StoreError> {
        let _guard = self.file_lock.read().map_err(|_| StoreError::Poisoned)?;
        self.read_all()
    }

    fn set_priority(&self, id: &str, priority: Priority) -> Result<bool, StoreError> {
        let _guard = self.file_lock.write().map_err(|_| StoreError::Poisoned)?;

        let mut tickets = self.read_all()?;
        let Some(ticket) = tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        ticket.priority = priority;

        self.write_all(&tickets)?;
        Ok(true)
    }
}

/// Read and parse a ticket array from a JSON file.
pub fn read_tickets(path: &Path) -> Result<Vec<Ticket>, StoreError> {
    let data = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
