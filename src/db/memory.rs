use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::Repository,
    error::{AppError, AppResult},
    models::{
        user::PasswordDigest, MovieId, NewSavedMovie, RecommendationRecord, SavedList, SavedMovie,
        User,
    },
};

#[derive(Default)]
struct MemoryInner {
    users: Vec<(User, PasswordDigest)>,
    movies: Vec<RecommendationRecord>,
    saved: HashMap<SavedList, Vec<SavedMovie>>,
    next_user_id: i32,
    next_saved_id: i32,
}

/// [`Repository`] kept in process memory
#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the movie catalog
    pub fn with_movies(movies: Vec<RecommendationRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryInner {
                movies,
                ..MemoryInner::default()
            })),
        }
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    async fn create_user(&self, email: &str, password: &PasswordDigest) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|(user, _)| user.email == email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            email: email.to_string(),
        };
        inner.users.push((user.clone(), password.clone()));
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<(User, PasswordDigest)>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|(user, _)| user.email == email)
            .cloned())
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }

    async fn list_movies(&self) -> AppResult<Vec<RecommendationRecord>> {
        Ok(self.inner.read().await.movies.clone())
    }

    async fn get_movie(&self, id: MovieId) -> AppResult<Option<RecommendationRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.iter().find(|movie| movie.id == id).cloned())
    }

    async fn list_saved(&self, user_id: i32, list: SavedList) -> AppResult<Vec<SavedMovie>> {
        let inner = self.inner.read().await;
        Ok(inner
            .saved
            .get(&list)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn add_saved(
        &self,
        user_id: i32,
        list: SavedList,
        movie: &NewSavedMovie,
    ) -> AppResult<SavedMovie> {
        let mut inner = self.inner.write().await;
        inner.next_saved_id += 1;
        let row = SavedMovie {
            id: inner.next_saved_id,
            user_id,
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            image: movie.image.clone(),
            description: movie.description.clone(),
            rating: movie.rating,
            created_at: Utc::now(),
        };
        inner.saved.entry(list).or_default().push(row.clone());
        Ok(row)
    }

    async fn remove_saved(
        &self,
        user_id: i32,
        list: SavedList,
        movie_id: MovieId,
    ) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let Some(rows) = inner.saved.get_mut(&list) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !(row.user_id == user_id && row.movie_id == movie_id));
        Ok((before - rows.len()) as u64)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
