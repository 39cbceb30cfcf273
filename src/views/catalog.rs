//! Catalog screen: header, search/sort summary and the book grid or list

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use super::book_card::{fit, render_card};
use crate::{
    models::{Book, SortKey, ViewMode},
    services::CatalogState,
};

/// Cards per row in grid mode
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Table row for the list layout
#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author(s)")]
    authors: String,
    #[tabled(rename = "Pages")]
    pages: u32,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "ISBN")]
    isbn: String,
    #[tabled(rename = "Added")]
    added: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            title: fit(&book.title, 40).trim_end().to_string(),
            authors: book.authors_display(),
            pages: book.pages,
            year: book.publish_year,
            isbn: book.isbn.clone().unwrap_or_default(),
            added: book.created_on(),
            id: book.id.clone(),
        }
    }
}

/// Presentation settings of the catalog screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub search: String,
    pub sort: SortKey,
    pub mode: ViewMode,
    pub columns: usize,
}

impl CatalogView {
    pub fn new(sort: SortKey, mode: ViewMode) -> Self {
        Self {
            search: String::new(),
            sort,
            mode,
            columns: DEFAULT_GRID_COLUMNS,
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Books that pass the current search, in collection order
    pub fn visible<'a>(&self, state: &'a CatalogState) -> Vec<&'a Book> {
        state.search(&self.search)
    }

    pub fn render(&self, state: &CatalogState) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Library catalog · {} {} registered\n",
            state.total,
            if state.total == 1 { "book" } else { "books" }
        ));

        let mut summary = format!("Sort: {} · View: {}", self.sort.label(), self.mode);
        if self.is_searching() {
            summary.push_str(&format!(" · Search: \"{}\"", self.search.trim()));
        }
        out.push_str(&summary);
        out.push_str("\n\n");

        if state.loading {
            out.push_str("Loading books...\n");
            return out;
        }

        let books = self.visible(state);
        if books.is_empty() {
            if self.is_searching() {
                out.push_str("No books found\nTry different search terms.\n");
            } else {
                out.push_str("No books registered\nStart by adding the first book to your library (`add`).\n");
            }
            return out;
        }

        match self.mode {
            ViewMode::Grid => out.push_str(&render_grid(&books, self.columns.max(1))),
            ViewMode::List => out.push_str(&render_list(&books)),
        }
        out.push('\n');
        out
    }
}

fn render_grid(books: &[&Book], columns: usize) -> String {
    let mut rows = Vec::new();
    for chunk in books.chunks(columns) {
        let cards: Vec<Vec<String>> = chunk.iter().map(|book| render_card(book)).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);
        let width = cards
            .first()
            .and_then(|card| card.first())
            .map(|line| line.chars().count())
            .unwrap_or(0);

        for i in 0..height {
            let line: Vec<String> = cards
                .iter()
                .map(|card| card.get(i).cloned().unwrap_or_else(|| " ".repeat(width)))
                .collect();
            rows.push(line.join("  ").trim_end().to_string());
        }
    }
    rows.join("\n")
}

fn render_list(books: &[&Book]) -> String {
    let rows: Vec<BookRow> = books.iter().map(|book| BookRow::from(*book)).collect();
    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}
