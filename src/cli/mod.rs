//! Command line surface.
//!
//! Without a subcommand the interactive shell starts; the other commands run
//! a single catalog operation and exit.

pub mod commands;
pub mod prompt;
pub mod shell;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    models::{FormField, SortKey, ViewMode},
    views::FormView,
};

#[derive(Parser, Debug)]
#[clap(
    name = "biblioteca",
    about = "Console client for the Biblioteca books API",
    version
)]
pub struct Cli {
    /// Base URL of the books API (overrides configuration)
    #[clap(long, global = true)]
    pub api_url: Option<String>,

    /// Log level (overrides configuration; RUST_LOG wins over both)
    #[clap(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether the API answers
    Status,

    /// List one page of books
    List(ListArgs),

    /// Show a single book
    Show {
        /// Book id
        id: String,
    },

    /// Register a new book
    Add(BookFields),

    /// Edit an existing book; omitted fields keep their value
    Edit {
        /// Book id
        id: String,

        #[clap(flatten)]
        fields: BookFields,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: String,

        /// Do not ask for confirmation
        #[clap(long, short)]
        yes: bool,
    },

    /// Interactive session (default)
    Shell,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Sort key: -created_at, created_at, title, -title, publish_year, -publish_year
    #[clap(long, short, allow_hyphen_values = true)]
    pub sort: Option<SortKey>,

    /// Page size
    #[clap(long)]
    pub limit: Option<u32>,

    /// Records to skip
    #[clap(long, default_value_t = 0)]
    pub offset: u32,

    /// Only show books whose title or author contains this text
    #[clap(long)]
    pub search: Option<String>,

    /// Layout: grid or list
    #[clap(long)]
    pub view: Option<ViewMode>,
}

/// Field values for add/edit; each one is run through the same form
/// validation as the interactive shell
#[derive(Args, Debug, Default)]
pub struct BookFields {
    #[clap(long)]
    pub title: Option<String>,

    /// Comma separated
    #[clap(long)]
    pub authors: Option<String>,

    #[clap(long)]
    pub pages: Option<String>,

    #[clap(long = "year")]
    pub publish_year: Option<String>,

    /// Empty string clears it
    #[clap(long)]
    pub cover_url: Option<String>,

    /// Empty string clears it
    #[clap(long)]
    pub isbn: Option<String>,
}

impl BookFields {
    /// Copy the given values over the form's current ones
    pub fn apply(&self, form: &mut FormView) {
        let values = [
            (FormField::Title, &self.title),
            (FormField::Authors, &self.authors),
            (FormField::Pages, &self.pages),
            (FormField::PublishYear, &self.publish_year),
            (FormField::CoverUrl, &self.cover_url),
            (FormField::Isbn, &self.isbn),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value.as_str());
            }
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
