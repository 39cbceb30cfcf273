//! Configuration management for the Biblioteca console

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::models::{ListQuery, SortKey, ViewMode};

/// Local development backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub page_size: u32,
    pub default_sort: SortKey,
    pub view: ViewMode,
}

impl CatalogConfig {
    /// First-page query used when the catalog opens
    pub fn initial_query(&self) -> ListQuery {
        ListQuery {
            limit: self.page_size,
            offset: 0,
            sort: self.default_sort,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Self::builder_with_defaults()?
            // Optional project-wide configuration file
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. BIBLIOTECA__API__BASE_URL)
            .add_source(
                Environment::with_prefix("BIBLIOTECA")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override API URL from BIBLIOTECA_API_URL env var if present
            .set_override_option("api.base_url", env::var("BIBLIOTECA_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Builder pre-seeded with the built-in defaults, before any file or
    /// environment source
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let catalog = CatalogConfig::default();
        let logging = LoggingConfig::default();

        Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("catalog.page_size", i64::from(catalog.page_size))?
            .set_default("catalog.default_sort", catalog.default_sort.as_str())?
            .set_default("catalog.view", catalog.view.as_str())?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let query = ListQuery::default();
        Self {
            page_size: query.limit,
            default_sort: query.sort,
            view: ViewMode::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
