use crate::{
    error::AppResult,
    models::{RecommendationRecord, SavedList},
};

pub mod memory;
pub mod remote;

pub use memory::InMemorySink;
pub use remote::RemoteSink;

/// Side effects of swipe decisions
///
/// A sink decides which persisted lists each verdict touches. Calls are made
/// one at a time, in deck order. A returned error is logged by the caller and
/// never rolls back the deck.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DecisionSink: Send + Sync {
    async fn on_accept(&self, record: &RecommendationRecord) -> AppResult<()>;

    async fn on_reject(&self, record: &RecommendationRecord) -> AppResult<()>;

    /// Sink name for logging
    fn name(&self) -> &'static str;
}

/// Which saved lists each verdict writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRouting {
    pub on_accept: Vec<SavedList>,
    pub on_reject: Vec<SavedList>,
}

impl Default for ListRouting {
    /// Accepting saves to the watchlist and the preference list; rejecting
    /// persists nothing.
    fn default() -> Self {
        Self {
            on_accept: vec![SavedList::Watchlist, SavedList::Preferences],
            on_reject: Vec::new(),
        }
    }
}
