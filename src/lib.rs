//! StreamFlix: swipeable movie recommendations and the CRUD backend that
//! stores what users keep.
//!
//! - [`engine`] turns drag gestures and swipe commands into accept/reject
//!   decisions, one per recommendation, in deck order.
//! - [`services`] loads recommendations and persists decisions.
//! - [`api`] serves users, the movie catalog, watchlists and preferences.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, EngineError};
