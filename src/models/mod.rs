use serde::{Deserialize, Serialize};

pub mod saved_movie;
pub mod user;

pub use saved_movie::{NewSavedMovie, SavedList, SavedMovie};
pub use user::{Credentials, User};

/// Identifier of a movie, stable across a session (TMDB numeric id)
pub type MovieId = i64;

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// A single recommendation shown on the swipe deck
///
/// The deck treats records as opaque payloads: only `id` is ever inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecommendationRecord {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub rating: f64,
    #[serde(rename = "image")]
    #[sqlx(rename = "image")]
    pub image_ref: Option<String>,
}

impl RecommendationRecord {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            rating: 0.0,
            image_ref: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw page returned by GET /movie/popular
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<TmdbMovie>,
}

/// One entry of a TMDB result page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<TmdbMovie> for RecommendationRecord {
    fn from(movie: TmdbMovie) -> Self {
        RecommendationRecord {
            id: movie.id,
            title: movie.title,
            description: movie.overview.unwrap_or_default(),
            rating: movie.vote_average.unwrap_or_default(),
            image_ref: movie
                .poster_path
                .map(|path| format!("{}{}", TMDB_IMAGE_BASE, path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_to_record() {
        let movie = TmdbMovie {
            id: 27205,
            title: "Inception".to_string(),
            overview: Some("Cobb, a skilled thief".to_string()),
            vote_average: Some(8.4),
            poster_path: Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg".to_string()),
        };

        let record: RecommendationRecord = movie.into();
        assert_eq!(record.id, 27205);
        assert_eq!(record.title, "Inception");
        assert_eq!(record.description, "Cobb, a skilled thief");
        assert_eq!(record.rating, 8.4);
        assert_eq!(
            record.image_ref.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg")
        );
    }

    #[test]
    fn test_tmdb_movie_without_poster_has_no_image() {
        let movie = TmdbMovie {
            id: 1,
            title: "Untitled".to_string(),
            overview: None,
            vote_average: None,
            poster_path: None,
        };

        let record: RecommendationRecord = movie.into();
        assert_eq!(record.image_ref, None);
        assert_eq!(record.description, "");
        assert_eq!(record.rating, 0.0);
    }

    #[test]
    fn test_tmdb_page_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "overview": "Set in the 22nd century",
                    "vote_average": 8.2,
                    "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
                    "adult": false,
                    "genre_ids": [28, 878]
                }
            ],
            "total_pages": 500
        }"#;

        let page: TmdbPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 603);
        assert_eq!(page.results[0].vote_average, Some(8.2));
    }

    #[test]
    fn test_record_serializes_image_field() {
        let record = RecommendationRecord::new(2, "The Matrix").with_image("poster.jpg");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["image"], "poster.jpg");
        assert!(json.get("image_ref").is_none());
    }
}
