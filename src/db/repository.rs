use crate::{
    error::AppResult,
    models::{
        user::PasswordDigest, MovieId, NewSavedMovie, RecommendationRecord, SavedList, SavedMovie,
        User,
    },
};

/// Storage behind the CRUD backend, implemented by
/// [`PgRepository`](crate::db::PgRepository) and
/// [`MemoryRepository`](crate::db::MemoryRepository)
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    /// Inserts a user; a taken email is `AppError::Conflict`
    async fn create_user(&self, email: &str, password: &PasswordDigest) -> AppResult<User>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<(User, PasswordDigest)>>;

    async fn get_user(&self, id: i32) -> AppResult<Option<User>>;

    async fn list_movies(&self) -> AppResult<Vec<RecommendationRecord>>;

    async fn get_movie(&self, id: MovieId) -> AppResult<Option<RecommendationRecord>>;

    /// Saved rows of one list, oldest first
    async fn list_saved(&self, user_id: i32, list: SavedList) -> AppResult<Vec<SavedMovie>>;

    async fn add_saved(
        &self,
        user_id: i32,
        list: SavedList,
        movie: &NewSavedMovie,
    ) -> AppResult<SavedMovie>;

    /// Deletes every row for `movie_id`; returns how many were removed
    async fn remove_saved(&self, user_id: i32, list: SavedList, movie_id: MovieId)
        -> AppResult<u64>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
