use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{NewSavedMovie, RecommendationRecord, SavedList},
    services::sinks::{DecisionSink, ListRouting},
};

/// Persists decisions through the CRUD backend
///
/// Each targeted list becomes one `POST /users/{id}/{list}` call carrying the
/// movie payload.
#[derive(Clone)]
pub struct RemoteSink {
    http_client: HttpClient,
    api_url: String,
    user_id: i32,
    routing: ListRouting,
}

impl RemoteSink {
    pub fn new(api_url: impl Into<String>, user_id: i32, routing: ListRouting) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            user_id,
            routing,
        }
    }

    fn list_url(&self, list: SavedList) -> String {
        format!("{}/users/{}/{}", self.api_url, self.user_id, list.path())
    }

    async fn save(&self, targets: &[SavedList], record: &RecommendationRecord) -> AppResult<()> {
        let payload = NewSavedMovie::from(record);

        for list in targets {
            let response = self
                .http_client
                .post(self.list_url(*list))
                .json(&payload)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "Backend returned status {} for {:?}: {}",
                    status, list, body
                )));
            }

            tracing::debug!(
                user_id = self.user_id,
                movie_id = record.id,
                list = ?list,
                "Saved movie to list"
            );
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl DecisionSink for RemoteSink {
    async fn on_accept(&self, record: &RecommendationRecord) -> AppResult<()> {
        self.save(&self.routing.on_accept, record).await
    }

    async fn on_reject(&self, record: &RecommendationRecord) -> AppResult<()> {
        self.save(&self.routing.on_reject, record).await
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
