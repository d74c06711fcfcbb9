//! BAT Server - Borrowing Administration Tool
//!
//! Lending rules for a community library whose catalogue mixes books, DVDs
//! and magazines with gardening, carpentry and makerspace tools, served as a
//! REST JSON API over an in-memory library persisted to JSON files.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod shutdown;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.policy.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
