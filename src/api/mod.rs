//! REST client for the books backend

pub mod books;
pub mod health;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{Book, BookCreate, BookPage, BookUpdate, ListQuery},
};

const USER_AGENT: &str = concat!("biblioteca/", env!("CARGO_PKG_VERSION"));

/// Operations the catalog needs from the remote API.
///
/// `ApiClient` is the HTTP implementation; the store and the connectivity
/// check only see this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookBackend: Send + Sync {
    /// `GET /health`; any 2xx counts as healthy
    async fn health(&self) -> AppResult<()>;

    async fn list_books(&self, query: &ListQuery) -> AppResult<BookPage>;

    async fn get_book(&self, id: &str) -> AppResult<Book>;

    async fn create_book(&self, payload: &BookCreate) -> AppResult<Book>;

    async fn update_book(&self, id: &str, payload: &BookUpdate) -> AppResult<Book>;

    async fn delete_book(&self, id: &str) -> AppResult<()>;
}

/// HTTP client bound to one backend base URL
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration. No timeout is set unless configured.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BookBackend for ApiClient {
    async fn health(&self) -> AppResult<()> {
        self.check_health().await
    }

    async fn list_books(&self, query: &ListQuery) -> AppResult<BookPage> {
        self.fetch_page(query).await
    }

    async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.fetch_book(id).await
    }

    async fn create_book(&self, payload: &BookCreate) -> AppResult<Book> {
        self.post_book(payload).await
    }

    async fn update_book(&self, id: &str, payload: &BookUpdate) -> AppResult<Book> {
        self.patch_book(id, payload).await
    }

    async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.remove_book(id).await
    }
}

/// Pass 2xx responses through; turn anything else into `AppError::Status`
/// carrying the server's `detail` message, or `fallback` when there is none.
pub(crate) async fn ensure_success(response: Response, fallback: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = detail_message(&body).unwrap_or_else(|| fallback.to_string());
    tracing::warn!("API answered {}: {}", status, message);

    Err(AppError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Decode a JSON body, reporting shape mismatches as malformed responses
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedResponse(e.to_string()))
}

/// Extract a string `detail` field from an error body
pub(crate) fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
