//! Single book rendered as a fixed-width card

use crate::models::Book;

/// Characters between the card borders
pub const CARD_INNER_WIDTH: usize = 34;

/// Card lines, all exactly `CARD_INNER_WIDTH + 4` characters wide
pub fn render_card(book: &Book) -> Vec<String> {
    let mut body = vec![
        book.title.clone(),
        format!("by {}", book.authors_display()),
        format!("{} pages · {}", book.pages, book.publish_year),
    ];
    if let Some(isbn) = book.isbn.as_deref().filter(|isbn| !isbn.trim().is_empty()) {
        body.push(format!("ISBN {}", isbn));
    }
    body.push(format!("Added {}", book.created_on()));
    body.push(format!("id {}", book.id));

    let border = "─".repeat(CARD_INNER_WIDTH + 2);
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("╭{}╮", border));
    for line in body {
        lines.push(format!("│ {} │", fit(&line, CARD_INNER_WIDTH)));
    }
    lines.push(format!("╰{}╯", border));
    lines
}

/// Detailed multi-line description used by `show`
pub fn render_details(book: &Book) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", book.title));
    out.push_str(&format!("  Author(s): {}\n", book.authors_display()));
    out.push_str(&format!("  Pages:     {}\n", book.pages));
    out.push_str(&format!("  Year:      {}\n", book.publish_year));
    if let Some(isbn) = &book.isbn {
        out.push_str(&format!("  ISBN:      {}\n", isbn));
    }
    out.push_str(&format!("  Cover:     {}\n", book.cover_source()));
    out.push_str(&format!("  Added:     {}\n", book.created_on()));
    out.push_str(&format!("  ID:        {}\n", book.id));
    out
}

/// Pad or truncate to exactly `width` characters
pub(crate) fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{}{}", text, " ".repeat(width - count))
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
