use crate::{
    db::Repository,
    error::{AppError, AppResult},
    models::{user::PasswordDigest, Credentials, User},
};

fn validate(credentials: &Credentials) -> AppResult<String> {
    let email = credentials.normalized_email();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput("A valid email is required".to_string()));
    }
    if credentials.password.is_empty() {
        return Err(AppError::InvalidInput("Password cannot be empty".to_string()));
    }
    Ok(email)
}

/// Registers a new user
pub async fn register(repo: &dyn Repository, credentials: &Credentials) -> AppResult<User> {
    let email = validate(credentials)?;
    let user = repo
        .create_user(&email, &PasswordDigest::new(&credentials.password))
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Checks credentials; unknown email and wrong password are indistinguishable
pub async fn login(repo: &dyn Repository, credentials: &Credentials) -> AppResult<User> {
    let email = credentials.normalized_email();
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let (user, digest) = repo
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    if !digest.verify(&credentials.password) {
        tracing::debug!(user_id = user.id, "Rejected login");
        return Err(invalid());
    }

    Ok(user)
}

pub async fn get_user(repo: &dyn Repository, id: i32) -> AppResult<User> {
    repo.get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
