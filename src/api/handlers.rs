use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Credentials, MovieId, NewSavedMovie, RecommendationRecord, SavedList, SavedMovie, User},
    services::{accounts, library},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(credentials): Json<Credentials>,
) -> AppResult<(StatusCode, Json<User>)> {
    tracing::info!(request_id = %request_id, "Processing registration");
    let user = accounts::register(state.repo.as_ref(), &credentials).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<User>> {
    let user = accounts::login(state.repo.as_ref(), &credentials).await?;
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<User>> {
    let user = accounts::get_user(state.repo.as_ref(), user_id).await?;
    Ok(Json(user))
}

/// Get the whole movie catalog
pub async fn get_movies(State(state): State<AppState>) -> AppResult<Json<Vec<RecommendationRecord>>> {
    let movies = library::list_movies(state.repo.as_ref()).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<RecommendationRecord>> {
    let movie = library::get_movie(state.repo.as_ref(), movie_id).await?;
    Ok(Json(movie))
}

pub async fn get_watchlist(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<SavedMovie>>> {
    list(state, user_id, SavedList::Watchlist).await
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(movie): Json<NewSavedMovie>,
) -> AppResult<(StatusCode, Json<SavedMovie>)> {
    add(state, user_id, SavedList::Watchlist, movie).await
}

/// Remove every watchlist entry for a movie
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i32, MovieId)>,
) -> AppResult<StatusCode> {
    library::remove_saved(state.repo.as_ref(), user_id, SavedList::Watchlist, movie_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<SavedMovie>>> {
    list(state, user_id, SavedList::Preferences).await
}

pub async fn add_preference(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(movie): Json<NewSavedMovie>,
) -> AppResult<(StatusCode, Json<SavedMovie>)> {
    add(state, user_id, SavedList::Preferences, movie).await
}

async fn list(state: AppState, user_id: i32, list: SavedList) -> AppResult<Json<Vec<SavedMovie>>> {
    let rows = library::list_saved(state.repo.as_ref(), user_id, list).await?;
    Ok(Json(rows))
}

async fn add(
    state: AppState,
    user_id: i32,
    list: SavedList,
    movie: NewSavedMovie,
) -> AppResult<(StatusCode, Json<SavedMovie>)> {
    let row = library::add_saved(state.repo.as_ref(), user_id, list, &movie).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
