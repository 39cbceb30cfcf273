//! Data models for Biblioteca

pub mod book;
pub mod enums;
pub mod form;

// Re-export commonly used types
pub use book::{Book, BookCreate, BookListResponse, BookPage, BookUpdate, ListQuery};
pub use enums::{SortKey, ViewMode};
pub use form::{BookForm, FieldErrors, FormField};
