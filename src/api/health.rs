//! Health endpoint (`/health`)

use super::{ensure_success, ApiClient};
use crate::error::AppResult;

impl ApiClient {
    /// Probe `GET /health`. The body is not inspected.
    pub async fn check_health(&self) -> AppResult<()> {
        tracing::debug!("GET /health on {}", self.base_url);

        let response = self.http.get(self.url("/health")).send().await?;
        ensure_success(response, "API did not respond").await?;
        Ok(())
    }
}
