use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{RecommendationRecord, TmdbPage},
};

const POPULAR_CACHE_TTL: u64 = 3600; // 1 hour
const LANGUAGE: &str = "en-US";

/// Supplies the ordered list of recommendations for a deck
///
/// Loading never fails: sources fall back to static data instead.
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn load(&self) -> Vec<RecommendationRecord>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Records shown when the metadata API cannot be reached
pub fn fallback_recommendations() -> Vec<RecommendationRecord> {
    vec![
        RecommendationRecord::new(1, "Inception")
            .with_description(
                "A thief who steals corporate secrets through dream-sharing technology.",
            )
            .with_rating(8.8)
            .with_image("https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg"),
        RecommendationRecord::new(2, "The Matrix")
            .with_description("A computer programmer discovers a mysterious world.")
            .with_rating(8.7)
            .with_image("https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
        RecommendationRecord::new(3, "The Dark Knight")
            .with_description(
                "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham.",
            )
            .with_rating(8.9)
            .with_image("https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
    ]
}

/// Fixed list of records
#[derive(Debug, Clone)]
pub struct StaticSource {
    items: Vec<RecommendationRecord>,
}

impl StaticSource {
    pub fn new(items: Vec<RecommendationRecord>) -> Self {
        Self { items }
    }

    pub fn fallback() -> Self {
        Self::new(fallback_recommendations())
    }
}

#[async_trait::async_trait]
impl RecommendationSource for StaticSource {
    async fn load(&self) -> Vec<RecommendationRecord> {
        self.items.clone()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Popular movies from the TMDB API
#[derive(Clone)]
pub struct TmdbSource {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    page: u32,
    cache: Option<Cache>,
}

impl TmdbSource {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            page: 1,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    async fn fetch_popular(&self) -> AppResult<Vec<RecommendationRecord>> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::PopularMovies(self.page),
                POPULAR_CACHE_TTL,
                self.fetch_from_api()
            ),
            None => self.fetch_from_api().await,
        }
    }

    async fn fetch_from_api(&self) -> AppResult<Vec<RecommendationRecord>> {
        let url = format!("{}/movie/popular", self.api_url);
        let page_param = self.page.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", LANGUAGE),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let body: TmdbPage = response.json().await?;
        let page = body.page;
        let records: Vec<RecommendationRecord> = body
            .results
            .into_iter()
            .map(RecommendationRecord::from)
            .collect();

        tracing::info!(
            page,
            results = records.len(),
            "Fetched popular movies"
        );

        Ok(records)
    }
}

#[async_trait::async_trait]
impl RecommendationSource for TmdbSource {
    async fn load(&self) -> Vec<RecommendationRecord> {
        match self.fetch_popular().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to static recommendations");
                fallback_recommendations()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
