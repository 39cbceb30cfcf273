//! Delete confirmation dialog

use crate::models::Book;

pub const TITLE: &str = "Confirm deletion";

pub fn render_prompt(book: Option<&Book>) -> String {
    let subject = match book {
        Some(book) => format!("\"{}\"", book.title),
        None => "this book".to_string(),
    };
    format!(
        "{}\nAre you sure you want to delete {}? This action cannot be undone.\nDelete? [y/N] ",
        TITLE, subject
    )
}

/// Only an explicit yes confirms; anything else cancels
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
