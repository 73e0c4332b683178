use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MovieId, RecommendationRecord};

/// The two persisted per-user movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedList {
    Watchlist,
    Preferences,
}

impl SavedList {
    /// Backing table name
    pub fn table(self) -> &'static str {
        match self {
            SavedList::Watchlist => "watchlist",
            SavedList::Preferences => "user_preferences",
        }
    }

    /// Path segment under `/users/{id}/`
    pub fn path(self) -> &'static str {
        match self {
            SavedList::Watchlist => "watchlist",
            SavedList::Preferences => "preferences",
        }
    }
}

/// Payload for adding a movie to a saved list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedMovie {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl From<&RecommendationRecord> for NewSavedMovie {
    fn from(record: &RecommendationRecord) -> Self {
        Self {
            movie_id: record.id,
            title: record.title.clone(),
            image: record.image_ref.clone(),
            description: Some(record.description.clone()),
            rating: Some(record.rating),
        }
    }
}

/// A stored watchlist or preference row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedMovie {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: MovieId,
    pub title: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_saved_movie_from_record() {
        let record = RecommendationRecord::new(3, "The Dark Knight")
            .with_description("Gotham")
            .with_rating(8.9)
            .with_image("https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg");

        let payload = NewSavedMovie::from(&record);
        assert_eq!(payload.movie_id, 3);
        assert_eq!(payload.title, "The Dark Knight");
        assert_eq!(payload.description.as_deref(), Some("Gotham"));
        assert_eq!(payload.rating, Some(8.9));
        assert_eq!(payload.image, record.image_ref);
    }

    #[test]
    fn test_new_saved_movie_optional_fields_default() {
        let payload: NewSavedMovie =
            serde_json::from_str(r#"{"movie_id": 7, "title": "Heat"}"#).unwrap();
        assert_eq!(payload.movie_id, 7);
        assert_eq!(payload.image, None);
        assert_eq!(payload.rating, None);
    }

    #[test]
    fn test_saved_list_names() {
        assert_eq!(SavedList::Watchlist.table(), "watchlist");
        assert_eq!(SavedList::Preferences.table(), "user_preferences");
        assert_eq!(SavedList::Preferences.path(), "preferences");
    }
}
