use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{MovieId, RecommendationRecord, SavedList},
    services::sinks::{DecisionSink, ListRouting},
};

#[derive(Debug, Default)]
struct UserLists {
    watchlist: Vec<RecommendationRecord>,
    preferences: Vec<RecommendationRecord>,
}

/// Keeps a user's lists in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    routing: ListRouting,
    lists: Arc<RwLock<UserLists>>,
}

impl InMemorySink {
    pub fn new(routing: ListRouting) -> Self {
        Self {
            routing,
            lists: Arc::new(RwLock::new(UserLists::default())),
        }
    }

    pub async fn watchlist(&self) -> Vec<RecommendationRecord> {
        self.lists.read().await.watchlist.clone()
    }

    pub async fn preferences(&self) -> Vec<RecommendationRecord> {
        self.lists.read().await.preferences.clone()
    }

    /// Removes a movie from the watchlist; returns whether anything was removed
    pub async fn remove_from_watchlist(&self, movie_id: MovieId) -> bool {
        let mut lists = self.lists.write().await;
        let before = lists.watchlist.len();
        lists.watchlist.retain(|movie| movie.id != movie_id);
        lists.watchlist.len() != before
    }

    async fn save(&self, targets: &[SavedList], record: &RecommendationRecord) {
        let mut lists = self.lists.write().await;
        for target in targets {
            match target {
                SavedList::Watchlist => {
                    if !lists.watchlist.iter().any(|movie| movie.id == record.id) {
                        lists.watchlist.push(record.clone());
                    }
                }
                SavedList::Preferences => lists.preferences.push(record.clone()),
            }
        }
    }
}

#[async_trait::async_trait]
impl DecisionSink for InMemorySink {
    async fn on_accept(&self, record: &RecommendationRecord) -> AppResult<()> {
        self.save(&self.routing.on_accept, record).await;
        Ok(())
    }

    async fn on_reject(&self, record: &RecommendationRecord) -> AppResult<()> {
        self.save(&self.routing.on_reject, record).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
