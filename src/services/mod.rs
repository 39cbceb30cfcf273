//! Client-side services over the books API

pub mod catalog;
pub mod connectivity;
pub mod notifications;

use std::sync::Arc;

use crate::api::BookBackend;

pub use catalog::{CatalogState, CatalogStore};
pub use connectivity::{ApiStatus, ConnectivityCheck, Screen};
pub use notifications::{Notification, NotificationLevel, Notifier};

/// Container for all services
pub struct Services {
    pub catalog: CatalogStore,
    pub connectivity: ConnectivityCheck,
}

impl Services {
    /// Create all services over the same backend
    pub fn new(backend: Arc<dyn BookBackend>) -> Self {
        Self {
            catalog: CatalogStore::new(backend.clone()),
            connectivity: ConnectivityCheck::new(backend),
        }
    }
}
