use std::sync::Arc;

use crate::db::{MemoryRepository, Repository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// State backed by an empty in-memory repository
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }
}
