use crate::{
    db::Repository,
    error::{AppError, AppResult},
    models::{MovieId, NewSavedMovie, RecommendationRecord, SavedList, SavedMovie},
    services::accounts,
};

pub async fn list_movies(repo: &dyn Repository) -> AppResult<Vec<RecommendationRecord>> {
    repo.list_movies().await
}

pub async fn get_movie(repo: &dyn Repository, id: MovieId) -> AppResult<RecommendationRecord> {
    repo.get_movie(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

pub async fn list_saved(
    repo: &dyn Repository,
    user_id: i32,
    list: SavedList,
) -> AppResult<Vec<SavedMovie>> {
    accounts::get_user(repo, user_id).await?;
    repo.list_saved(user_id, list).await
}

pub async fn add_saved(
    repo: &dyn Repository,
    user_id: i32,
    list: SavedList,
    movie: &NewSavedMovie,
) -> AppResult<SavedMovie> {
    if movie.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Movie title cannot be empty".to_string()));
    }
    accounts::get_user(repo, user_id).await?;

    let row = repo.add_saved(user_id, list, movie).await?;
    tracing::info!(
        user_id,
        movie_id = movie.movie_id,
        list = ?list,
        "Movie saved"
    );
    Ok(row)
}

pub async fn remove_saved(
    repo: &dyn Repository,
    user_id: i32,
    list: SavedList,
    movie_id: MovieId,
) -> AppResult<()> {
    accounts::get_user(repo, user_id).await?;

    match repo.remove_saved(user_id, list, movie_id).await? {
        0 => Err(AppError::NotFound(format!("Movie {} is not saved", movie_id))),
        removed => {
            tracing::info!(user_id, movie_id, removed, list = ?list, "Movie removed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;
    use crate::models::Credentials;

    async fn repo_with_user() -> (MemoryRepository, i32) {
        let repo = MemoryRepository::new();
        let user = accounts::register(
            &repo,
            &Credentials {
                email: "a@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();
        (repo, user.id)
    }

    fn heat() -> NewSavedMovie {
        NewSavedMovie {
            movie_id: 949,
            title: "Heat".to_string(),
            image: None,
            description: None,
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let repo = MemoryRepository::new();
        let err = add_saved(&repo, 7, SavedList::Watchlist, &heat())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_missing_movie_is_not_found() {
        let (repo, user_id) = repo_with_user().await;
        let err = remove_saved(&repo, user_id, SavedList::Watchlist, 949)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        add_saved(&repo, user_id, SavedList::Watchlist, &heat())
            .await
            .unwrap();
        remove_saved(&repo, user_id, SavedList::Watchlist, 949)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let (repo, user_id) = repo_with_user().await;
        let mut movie = heat();
        movie.title = "  ".to_string();
        let err = add_saved(&repo, user_id, SavedList::Preferences, &movie)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
