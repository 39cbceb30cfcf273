//! Book form data and its client-side validation.
//!
//! Every field is kept as the text the user typed; numbers and the author
//! list are only parsed when the form is validated or submitted.

use std::collections::BTreeMap;

use super::book::{split_authors, Book, BookCreate, COVER_URL_RE, ISBN_RE};

pub const MIN_PUBLISH_YEAR: i64 = 1000;
pub const MAX_PUBLISH_YEAR: i64 = 2100;


/// Fields of the book form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Authors,
    CoverUrl,
    Isbn,
    Pages,
    PublishYear,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Authors,
        FormField::CoverUrl,
        FormField::Isbn,
        FormField::Pages,
        FormField::PublishYear,
    ];

    /// Payload key for this field
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Authors => "authors",
            FormField::CoverUrl => "cover_url",
            FormField::Isbn => "isbn",
            FormField::Pages => "pages",
            FormField::PublishYear => "publish_year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Authors => "Author(s)",
            FormField::CoverUrl => "Cover URL (optional)",
            FormField::Isbn => "ISBN (optional)",
            FormField::Pages => "Pages",
            FormField::PublishYear => "Year",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FormField::CoverUrl | FormField::Isbn)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validation messages keyed by the field that failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Forget the error of a field the user just edited
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Raw text of the create/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub authors: String,
    pub pages: String,
    pub publish_year: String,
    pub cover_url: String,
    pub isbn: String,
}

impl BookForm {
    /// Prefill the form from an existing record
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors.join(", "),
            pages: book.pages.to_string(),
            publish_year: book.publish_year.to_string(),
            cover_url: book.cover_url.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Authors => &self.authors,
            FormField::CoverUrl => &self.cover_url,
            FormField::Isbn => &self.isbn,
            FormField::Pages => &self.pages,
            FormField::PublishYear => &self.publish_year,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Authors => &mut self.authors,
            FormField::CoverUrl => &mut self.cover_url,
            FormField::Isbn => &mut self.isbn,
            FormField::Pages => &mut self.pages,
            FormField::PublishYear => &mut self.publish_year,
        };
        *slot = value.into();
    }

    /// Errors for exactly the fields that fail; empty when the form can be submitted
    pub fn validate(&self) -> FieldErrors {
        self.submit().err().unwrap_or_default()
    }

    /// Build the create payload, or report every failing field
    pub fn submit(&self) -> Result<BookCreate, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert(FormField::Title, "Title is required");
        }

        let authors = split_authors(&self.authors);
        if authors.is_empty() {
            errors.insert(FormField::Authors, "At least one author is required");
        }

        let pages = parse_int(&self.pages)
            .filter(|pages| *pages >= 1)
            .and_then(|pages| u32::try_from(pages).ok());
        if pages.is_none() {
            errors.insert(FormField::Pages, "Enter a valid number of pages (>= 1)");
        }

        let publish_year = parse_int(&self.publish_year)
            .filter(|year| (MIN_PUBLISH_YEAR..=MAX_PUBLISH_YEAR).contains(year))
            .and_then(|year| i32::try_from(year).ok());
        if publish_year.is_none() {
            errors.insert(FormField::PublishYear, "Enter a valid year (1000-2100)");
        }

        let cover_url = optional(&self.cover_url);
        if matches!(cover_url, Some(url) if !COVER_URL_RE.is_match(url)) {
            errors.insert(
                FormField::CoverUrl,
                "Enter a valid http/https URL or leave it blank",
            );
        }

        let isbn = optional(&self.isbn);
        if matches!(isbn, Some(isbn) if !ISBN_RE.is_match(isbn)) {
            errors.insert(FormField::Isbn, "ISBN may only contain digits, X and hyphens");
        }

        match (pages, publish_year) {
            (Some(pages), Some(publish_year)) if errors.is_empty() => Ok(BookCreate {
                title: title.to_string(),
                authors,
                pages,
                publish_year,
                cover_url: cover_url.map(str::to_string),
                isbn: isbn.map(str::to_string),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn optional(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|v| !v.is_empty())
}
