//! Interactive catalog session.
//!
//! The shell is a plain read-eval loop: every command awaits its store
//! operation, then pending notifications are printed and the catalog is
//! re-rendered if the store published a new state.

use std::io::Write;
use tokio::io::AsyncBufRead;
use tokio::sync::{
    broadcast::{self, error::TryRecvError},
    watch,
};

use super::prompt::Prompter;
use crate::{
    error::AppResult,
    models::{Book, ListQuery, SortKey, ViewMode},
    services::{ApiStatus, CatalogState, Notification, Screen},
    views::{book_card, confirm, instructions, CatalogView, FormSubmission, FormView},
    AppState,
};

const HELP: &str = "\
Commands:
  list | refresh         reload the catalog with the current sort
  search [TERM]          filter loaded books by title or author (no term clears)
  sort [KEY]             order by -created_at, created_at, title, -title, publish_year, -publish_year
  view grid|list         switch layout
  show ID                show one book
  add                    register a new book
  edit ID                edit a book
  delete ID              delete a book
  status | retry         check the API connection again
  help                   show this help
  quit | exit            leave";

const SETUP_HELP: &str = "\
The API is not connected. Available commands:
  retry                  check the API connection again
  help                   show this help
  quit | exit            leave";

pub struct Shell<'a, R, W> {
    app: &'a AppState,
    prompter: Prompter<R>,
    out: W,
    view: CatalogView,
    catalog: watch::Receiver<CatalogState>,
    notifications: broadcast::Receiver<Notification>,
    opened: bool,
}

impl<'a, R, W> Shell<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(app: &'a AppState, input: R, out: W) -> Self {
        let catalog_config = &app.config.catalog;
        Self {
            app,
            prompter: Prompter::new(input),
            out,
            view: CatalogView::new(catalog_config.default_sort, catalog_config.view),
            catalog: app.services.catalog.subscribe(),
            notifications: app.services.catalog.notifications(),
            opened: false,
        }
    }

    /// Run until `quit` or end of input; returns the output writer
    pub async fn run(mut self) -> AppResult<W> {
        self.check_connection(false).await?;
        self.flush_notifications()?;
        if self.app.services.connectivity.active_view() == Screen::Catalog {
            self.render_if_changed()?;
        }

        loop {
            let prompt = match self.app.services.connectivity.active_view() {
                Screen::Catalog => "biblioteca> ",
                Screen::Instructions => "setup> ",
            };
            let Some(line) = self.prompter.ask(&mut self.out, prompt).await? else {
                writeln!(self.out)?;
                break;
            };

            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let (command, rest) = match line.split_once(char::is_whitespace) {
                Some((command, rest)) => (command.to_ascii_lowercase(), rest.trim().to_string()),
                None => (line.to_ascii_lowercase(), String::new()),
            };
            if matches!(command.as_str(), "quit" | "exit") {
                break;
            }

            match self.app.services.connectivity.active_view() {
                Screen::Catalog => self.catalog_command(&command, &rest).await?,
                Screen::Instructions => self.setup_command(&command).await?,
            }
            self.flush_notifications()?;
            if self.app.services.connectivity.active_view() == Screen::Catalog {
                self.render_if_changed()?;
            }
        }

        tracing::debug!("Shell session finished");
        Ok(self.out)
    }

    async fn setup_command(&mut self, command: &str) -> AppResult<()> {
        match command {
            "retry" | "status" => self.check_connection(true).await,
            "help" => writeln!(self.out, "{}", SETUP_HELP).map_err(Into::into),
            other => writeln!(
                self.out,
                "Unknown command '{}' while the API is disconnected. Type `retry` or `help`.",
                other
            )
            .map_err(Into::into),
        }
    }

    async fn catalog_command(&mut self, command: &str, rest: &str) -> AppResult<()> {
        match command {
            "help" => writeln!(self.out, "{}", HELP)?,
            "list" | "refresh" => self.refresh().await,
            "search" => {
                self.view.search = rest.to_string();
                self.render()?;
            }
            "sort" => self.sort(rest).await?,
            "view" => match rest.parse::<ViewMode>() {
                Ok(mode) => {
                    self.view.mode = mode;
                    self.render()?;
                }
                Err(e) => writeln!(self.out, "{}", e.user_message())?,
            },
            "show" => {
                if let Some(book) = self.lookup(rest).await? {
                    write!(self.out, "{}", book_card::render_details(&book))?;
                }
            }
            "add" => self.add().await?,
            "edit" => self.edit(rest).await?,
            "delete" => self.delete(rest).await?,
            "status" | "retry" => self.check_connection(true).await?,
            other => writeln!(self.out, "Unknown command '{}'. Type `help`.", other)?,
        }
        Ok(())
    }

    /// Probe the API and switch between the catalog and the instructions
    async fn check_connection(&mut self, retry: bool) -> AppResult<()> {
        let connectivity = &self.app.services.connectivity;
        let status = if retry {
            connectivity.retry().await
        } else {
            connectivity.probe().await
        };

        match status {
            ApiStatus::Connected if !self.opened => {
                writeln!(self.out, "API status: {}", status.label())?;
                self.opened = true;
                let query = self.query();
                self.app.services.catalog.init(query).await;
            }
            ApiStatus::Connected | ApiStatus::Checking => {
                writeln!(self.out, "API status: {}", status.label())?;
            }
            ApiStatus::Disconnected => {
                write!(
                    self.out,
                    "{}",
                    instructions::render(
                        status,
                        &self.app.config.api.base_url,
                        connectivity.is_checking()
                    )
                )?;
            }
        }
        Ok(())
    }

    fn query(&self) -> ListQuery {
        ListQuery {
            sort: self.view.sort,
            ..self.app.config.catalog.initial_query()
        }
    }

    async fn refresh(&mut self) {
        let query = self.query();
        self.app.services.catalog.fetch_books(query).await;
    }

    async fn sort(&mut self, key: &str) -> AppResult<()> {
        if key.is_empty() {
            for sort in SortKey::ALL {
                let marker = if sort == self.view.sort { "*" } else { " " };
                writeln!(self.out, " {} {:<14} {}", marker, sort.as_str(), sort.label())?;
            }
            return Ok(());
        }
        match key.parse::<SortKey>() {
            Ok(sort) => {
                self.view.sort = sort;
                self.refresh().await;
            }
            Err(e) => writeln!(self.out, "{}", e.user_message())?,
        }
        Ok(())
    }

    /// Find a book in the loaded page, falling back to the API
    async fn lookup(&mut self, id: &str) -> AppResult<Option<Book>> {
        if id.is_empty() {
            writeln!(self.out, "Missing book id.")?;
            return Ok(None);
        }
        let cached = self.catalog.borrow().find(id).cloned();
        match cached {
            Some(book) => Ok(Some(book)),
            None => Ok(self.app.services.catalog.get_book(id).await),
        }
    }

    async fn add(&mut self) -> AppResult<()> {
        self.submit_form(FormView::new_book()).await
    }

    async fn edit(&mut self, id: &str) -> AppResult<()> {
        match self.lookup(id).await? {
            Some(book) => self.submit_form(FormView::edit(book)).await,
            None => Ok(()),
        }
    }

    /// Fill and send a form; on API failure offer to send the same form again
    async fn submit_form(&mut self, mut form: FormView) -> AppResult<()> {
        loop {
            let Some(submission) = self.prompter.fill_form(&mut self.out, &mut form).await? else {
                return Ok(());
            };

            let catalog = &self.app.services.catalog;
            let saved = match &submission {
                FormSubmission::Create(payload) => catalog.create_book(payload.clone()).await,
                FormSubmission::Update { id, payload } => {
                    catalog.update_book(id, payload.clone()).await
                }
            };

            if saved.is_some() {
                self.refresh().await;
                return Ok(());
            }

            self.flush_notifications()?;
            let answer = self.prompter.ask(&mut self.out, "Try again? [y/N] ").await?;
            if !answer.as_deref().is_some_and(confirm::is_confirmed) {
                return Ok(());
            }
        }
    }

    async fn delete(&mut self, id: &str) -> AppResult<()> {
        if id.is_empty() {
            writeln!(self.out, "Missing book id.")?;
            return Ok(());
        }
        let book = self.catalog.borrow().find(id).cloned();
        let answer = self
            .prompter
            .ask(&mut self.out, &confirm::render_prompt(book.as_ref()))
            .await?;

        if answer.as_deref().is_some_and(confirm::is_confirmed) {
            if self.app.services.catalog.delete_book(id).await {
                self.refresh().await;
            }
        } else {
            writeln!(self.out, "Deletion cancelled.")?;
        }
        Ok(())
    }

    fn flush_notifications(&mut self) -> AppResult<()> {
        loop {
            match self.notifications.try_recv() {
                Ok(notification) => writeln!(self.out, "{}", notification)?,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Skipped {} old notifications", skipped);
                }
                Err(_) => return Ok(()),
            }
        }
    }

    fn render_if_changed(&mut self) -> AppResult<()> {
        if self.catalog.has_changed().unwrap_or(false) {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> AppResult<()> {
        let rendered = self.view.render(&self.catalog.borrow_and_update());
        write!(self.out, "\n{}", rendered)?;
        Ok(())
    }
}
