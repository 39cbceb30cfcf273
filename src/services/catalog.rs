//! Catalog store: the client-side view of the remote book collection.
//!
//! The store is the only writer of the collection state. Front ends read it
//! through [`CatalogStore::subscribe`] and receive outcome messages through
//! [`CatalogStore::notifications`]. Operations never return errors: failures
//! are reported once as a notification and the state is left as described
//! on each method. Calls are independent; when two responses race, the one
//! applied last wins.

use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use super::notifications::{Notification, Notifier};
use crate::{
    api::BookBackend,
    models::{Book, BookCreate, BookUpdate, ListQuery},
};

/// Snapshot of the cached collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub books: Vec<Book>,
    pub total: u64,
    pub loading: bool,
}

impl CatalogState {
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Books whose title or authors match `term`, in collection order
    pub fn search(&self, term: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.matches_search(term))
            .collect()
    }
}

pub struct CatalogStore {
    backend: Arc<dyn BookBackend>,
    state: watch::Sender<CatalogState>,
    notifier: Notifier,
}

impl CatalogStore {
    pub fn new(backend: Arc<dyn BookBackend>) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            backend,
            state,
            notifier: Notifier::new(),
        }
    }

    /// Load the first page. Front ends call this once when the catalog opens.
    pub async fn init(&self, query: ListQuery) -> bool {
        tracing::info!("Opening catalog");
        self.fetch_books(query).await
    }

    /// Tear the store down; subscribers see their channels close.
    pub fn dispose(self) {
        tracing::info!("Closing catalog ({} cached books)", self.state.borrow().books.len());
        self.state.send_replace(CatalogState::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Replace the collection with one page from the backend.
    ///
    /// On any failure the collection is emptied and the total reset to zero.
    pub async fn fetch_books(&self, query: ListQuery) -> bool {
        self.state.send_modify(|state| state.loading = true);

        match self.backend.list_books(&query).await {
            Ok(page) => {
                tracing::info!(
                    "Loaded {} of {} books (sort {})",
                    page.books.len(),
                    page.total,
                    query.sort
                );
                self.state.send_modify(move |state| {
                    state.books = page.books;
                    state.total = page.total;
                    state.loading = false;
                });
                true
            }
            Err(e) => {
                match e.status_code() {
                    Some(status) => tracing::warn!("Loading books failed with {}: {}", status, e),
                    None => tracing::warn!("Loading books failed: {}", e),
                }
                self.state.send_modify(|state| {
                    state.books.clear();
                    state.total = 0;
                    state.loading = false;
                });
                self.notifier.error(e.user_message());
                false
            }
        }
    }

    /// Look up one record on the backend without touching the collection
    pub async fn get_book(&self, id: &str) -> Option<Book> {
        match self.backend.get_book(id).await {
            Ok(book) => Some(book),
            Err(e) => {
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Create a record; on success it is prepended and the total grows by one
    pub async fn create_book(&self, payload: BookCreate) -> Option<Book> {
        match self.backend.create_book(&payload).await {
            Ok(created) => {
                let record = created.clone();
                self.state.send_modify(move |state| {
                    state.books.insert(0, record);
                    state.total += 1;
                });
                self.notifier.success("Book created successfully!");
                Some(created)
            }
            Err(e) => {
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Apply a partial update; the server's record replaces the local one
    pub async fn update_book(&self, id: &str, payload: BookUpdate) -> Option<Book> {
        match self.backend.update_book(id, &payload).await {
            Ok(updated) => {
                let record = updated.clone();
                self.state.send_modify(move |state| {
                    if let Some(slot) = state.books.iter_mut().find(|book| book.id == id) {
                        *slot = record;
                    }
                });
                self.notifier.success("Book updated successfully!");
                Some(updated)
            }
            Err(e) => {
                self.notifier.error(e.user_message());
                None
            }
        }
    }

    /// Delete a record; the total never drops below zero
    pub async fn delete_book(&self, id: &str) -> bool {
        match self.backend.delete_book(id).await {
            Ok(()) => {
                self.state.send_modify(|state| {
                    state.books.retain(|book| book.id != id);
                    state.total = state.total.saturating_sub(1);
                });
                self.notifier.success("Book deleted successfully!");
                true
            }
            Err(e) => {
                self.notifier.error(e.user_message());
                false
            }
        }
    }
}
