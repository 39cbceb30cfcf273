//! Backend connectivity probe

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::watch;

use crate::api::BookBackend;

/// Result of the last health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    /// No probe has answered yet
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Checking => "Checking...",
            ApiStatus::Connected => "Connected",
            ApiStatus::Disconnected => "Disconnected",
        }
    }
}

/// Top-level screen chosen from the API status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Instructions,
}

impl From<ApiStatus> for Screen {
    fn from(status: ApiStatus) -> Self {
        match status {
            ApiStatus::Disconnected => Screen::Instructions,
            ApiStatus::Checking | ApiStatus::Connected => Screen::Catalog,
        }
    }
}

pub struct ConnectivityCheck {
    backend: Arc<dyn BookBackend>,
    status: watch::Sender<ApiStatus>,
    in_flight: AtomicUsize,
}

impl ConnectivityCheck {
    pub fn new(backend: Arc<dyn BookBackend>) -> Self {
        let (status, _) = watch::channel(ApiStatus::Checking);
        Self {
            backend,
            status,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Run the health probe once and record the outcome
    pub async fn probe(&self) -> ApiStatus {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let outcome = self.backend.health().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let status = match outcome {
            Ok(()) => ApiStatus::Connected,
            Err(e) => {
                tracing::warn!("API health check failed: {}", e);
                ApiStatus::Disconnected
            }
        };
        tracing::info!("API status: {}", status.label());
        self.status.send_replace(status);
        status
    }

    /// Manual re-check requested by the user
    pub async fn retry(&self) -> ApiStatus {
        self.probe().await
    }

    pub fn status(&self) -> ApiStatus {
        *self.status.borrow()
    }

    pub fn is_checking(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn active_view(&self) -> Screen {
        Screen::from(self.status())
    }

    pub fn subscribe(&self) -> watch::Receiver<ApiStatus> {
        self.status.subscribe()
    }
}
