use super::StorageBackend;
use crate::error::{Result, RosterError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct MemState {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

/// In-memory storage backend for testing.
///
/// Clones share the same underlying map, so a store can be "reloaded" by opening
/// a new one over a clone of the backend. Uses `Rc`/`RefCell` since roster is
/// single-threaded.
#[derive(Clone, Default)]
pub struct MemBackend {
    state: Rc<MemState>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.state.simulate_write_error.set(simulate);
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.state.writes.get()
    }

    /// Stores a raw value directly, bypassing the write counter.
    pub fn seed(&self, key: &str, value: &str) {
        self.state
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.state.simulate_write_error.get() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        self.state
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.state.writes.set(self.state.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = MemBackend::new();
        let b = a.clone();
        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(b.write_count(), 1);
    }

    #[test]
    fn simulated_errors_reject_writes() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        assert!(backend.write("k", "v").is_err());
        assert_eq!(backend.read("k").unwrap(), None);
        assert_eq!(backend.write_count(), 0);
    }
}
