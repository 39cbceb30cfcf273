//! Biblioteca
//!
//! A console client for a books catalog REST API: list, search, create,
//! edit and delete books, with connectivity checks and setup guidance when
//! the backend is down.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::{ApiClient, BookBackend};
use services::Services;

/// Application state shared by the shell and the one-shot commands
pub struct AppState {
    pub config: AppConfig,
    pub services: Services,
}

impl AppState {
    /// Build the HTTP client from configuration and wire the services to it
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ApiClient::new(&config.api)?;
        tracing::debug!("Using books API at {}", client.base_url());
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    pub fn with_backend(config: AppConfig, backend: Arc<dyn BookBackend>) -> Self {
        Self {
            config,
            services: Services::new(backend),
        }
    }

    /// Dispose the catalog store; open subscriptions are closed
    pub fn shutdown(self) {
        self.services.catalog.dispose();
    }
}
