//! Book record and the payloads exchanged with the books API.
//!
//! `Book` is owned by the backend: identifiers and creation timestamps are
//! assigned there and never modified by this client. `BookCreate` and
//! `BookUpdate` are the request bodies for `POST /books` and
//! `PATCH /books/{id}`.

use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use super::enums::SortKey;

/// Cover service used when a book has an ISBN but no explicit cover
pub const OPEN_LIBRARY_COVERS: &str = "https://covers.openlibrary.org/b/isbn";

/// Image shown for books without cover or ISBN
pub const PLACEHOLDER_COVER: &str = "https://placehold.co/600x800?text=No+Cover";

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Cover URLs must be http(s); shared by the form and the request payloads
pub(crate) static COVER_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://.+").expect("cover url pattern"));
pub(crate) static ISBN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9Xx-]+$").expect("isbn pattern"));

/// Full book record as returned by the API
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_authors")]
    pub authors: Vec<String>,
    pub pages: u32,
    pub publish_year: i32,
    pub created_at: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl Book {
    /// Image to display for this book: explicit cover, then the ISBN-based
    /// Open Library cover, then a placeholder.
    pub fn cover_source(&self) -> String {
        if let Some(url) = non_blank(self.cover_url.as_deref()) {
            return url.to_string();
        }
        match non_blank(self.isbn.as_deref()) {
            Some(isbn) => format!("{}/{}-L.jpg", OPEN_LIBRARY_COVERS, isbn),
            None => PLACEHOLDER_COVER.to_string(),
        }
    }

    /// Creation date as `dd/mm/yyyy`, or the raw value when it is not a timestamp
    pub fn created_on(&self) -> String {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.created_at) {
            return ts.format("%d/%m/%Y").to_string();
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            return ts.format("%d/%m/%Y").to_string();
        }
        self.created_at.clone()
    }

    /// Case-insensitive match of `term` against the title or any author.
    /// A blank term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term)
            || self
                .authors
                .iter()
                .any(|author| author.to_lowercase().contains(&term))
    }

    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

/// Create book request
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookCreate {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub authors: Vec<String>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: u32,
    #[validate(range(min = 1000, max = 2100, message = "Year must be between 1000 and 2100"))]
    pub publish_year: i32,
    #[validate(regex(path = *COVER_URL_RE, message = "Cover must be an http or https URL"))]
    pub cover_url: Option<String>,
    #[validate(regex(path = *ISBN_RE, message = "ISBN may only contain digits, X and hyphens"))]
    pub isbn: Option<String>,
}

impl BookCreate {
    /// Turn a full submission into a PATCH body that rewrites every field
    pub fn into_update(self) -> BookUpdate {
        BookUpdate {
            title: Some(self.title),
            authors: Some(self.authors),
            pages: Some(self.pages),
            publish_year: Some(self.publish_year),
            cover_url: self.cover_url,
            isbn: self.isbn,
        }
    }
}

/// Partial update request; absent fields are left untouched by the backend
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookUpdate {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: Option<u32>,
    #[validate(range(min = 1000, max = 2100, message = "Year must be between 1000 and 2100"))]
    pub publish_year: Option<i32>,
    #[validate(regex(path = *COVER_URL_RE, message = "Cover must be an http or https URL"))]
    pub cover_url: Option<String>,
    #[validate(regex(path = *ISBN_RE, message = "ISBN may only contain digits, X and hyphens"))]
    pub isbn: Option<String>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        *self == BookUpdate::default()
    }
}

/// Body of `GET /books`.
///
/// Current backends wrap the list in an envelope with a total count; older
/// ones answer with a bare array. Anything without a `books` list fails to
/// deserialize and is reported as a malformed response. A `total` that is
/// not a non-negative number is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookListResponse {
    Envelope {
        books: Vec<Book>,
        #[serde(default)]
        total: Option<serde_json::Value>,
    },
    Bare(Vec<Book>),
}

impl BookListResponse {
    /// Normalize both shapes; a missing or unusable total falls back to the
    /// list length
    pub fn into_page(self) -> BookPage {
        match self {
            BookListResponse::Envelope { books, total } => {
                let total = total
                    .as_ref()
                    .and_then(numeric_total)
                    .unwrap_or(books.len() as u64);
                BookPage { books, total }
            }
            BookListResponse::Bare(books) => BookPage {
                total: books.len() as u64,
                books,
            },
        }
    }
}

fn numeric_total(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.trunc() as u64)
    })
}

/// One page of the catalog plus the backend's total count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: u64,
}

/// Query parameters for `GET /books`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u32,
    pub sort: SortKey,
}

impl ListQuery {
    pub fn sorted(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort: SortKey::default(),
        }
    }
}

/// Split a comma-separated author list, dropping blank entries
pub fn split_authors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorsRepr {
    List(Vec<String>),
    Joined(String),
}

// Some backends store authors as a single "A, B" column.
fn deserialize_authors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AuthorsRepr>::deserialize(deserializer)? {
        Some(AuthorsRepr::List(authors)) => authors,
        Some(AuthorsRepr::Joined(joined)) => split_authors(&joined),
        None => Vec::new(),
    })
}
