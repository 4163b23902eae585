//! Bookshelf Server
//!
//! A REST JSON API for a book catalog: user registration and login with
//! JWT bearer tokens, and authenticated CRUD plus search/pagination over
//! book records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
