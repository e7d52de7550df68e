//! Application state for the Payslip Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the record store every handler reads from and writes to.
#[derive(Clone)]
pub struct AppState {
    store: Arc<InMemoryStore>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}
