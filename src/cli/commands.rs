//! One-shot command execution

use anyhow::Context;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::BufReader;

use super::{prompt::Prompter, shell::Shell, BookFields, Cli, Command, ListArgs};
use crate::{
    models::ListQuery,
    services::ApiStatus,
    views::{book_card, confirm, instructions, CatalogView, FormSubmission, FormView},
    AppConfig, AppState,
};

pub const EXIT_OK: u8 = 0;
/// A catalog operation or form validation failed
pub const EXIT_FAILED: u8 = 1;
/// The API could not be reached
pub const EXIT_DISCONNECTED: u8 = 2;

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    let app = AppState::new(config).context("Failed to create the API client")?;

    let code = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            Shell::new(&app, stdin, io::stdout())
                .run()
                .await
                .context("Shell session failed")?;
            ExitCode::SUCCESS
        }
        command => ExitCode::from(execute(&app, command, &mut io::stdout()).await?),
    };

    app.shutdown();
    Ok(code)
}

/// Run a non-interactive command, writing its output to `out`.
///
/// The API is probed first; when it is down the setup instructions are
/// printed instead and the exit code is [`EXIT_DISCONNECTED`].
pub async fn execute<W: Write>(
    app: &AppState,
    command: Command,
    out: &mut W,
) -> anyhow::Result<u8> {
    let status = app.services.connectivity.probe().await;
    if status == ApiStatus::Disconnected {
        write!(
            out,
            "{}",
            instructions::render(status, &app.config.api.base_url, false)
        )?;
        return Ok(EXIT_DISCONNECTED);
    }

    let mut notifications = app.services.catalog.notifications();
    let ok = match command {
        Command::Status => {
            writeln!(out, "API status: {} ({})", status.label(), app.config.api.base_url)?;
            true
        }
        Command::List(args) => list(app, args, out).await?,
        Command::Show { id } => match app.services.catalog.get_book(&id).await {
            Some(book) => {
                write!(out, "{}", book_card::render_details(&book))?;
                true
            }
            None => false,
        },
        Command::Add(fields) => submit(app, FormView::new_book(), &fields, out).await?,
        Command::Edit { id, fields } => match app.services.catalog.get_book(&id).await {
            Some(book) => submit(app, FormView::edit(book), &fields, out).await?,
            None => false,
        },
        Command::Delete { id, yes } => delete(app, &id, yes, out).await?,
        Command::Shell => anyhow::bail!("The shell cannot run as a one-shot command"),
    };

    while let Ok(notification) = notifications.try_recv() {
        writeln!(out, "{}", notification)?;
    }

    Ok(if ok { EXIT_OK } else { EXIT_FAILED })
}

async fn list<W: Write>(app: &AppState, args: ListArgs, out: &mut W) -> anyhow::Result<bool> {
    let catalog_config = &app.config.catalog;
    let query = ListQuery {
        limit: args.limit.unwrap_or(catalog_config.page_size),
        offset: args.offset,
        sort: args.sort.unwrap_or(catalog_config.default_sort),
    };

    let sort = query.sort;
    if !app.services.catalog.fetch_books(query).await {
        return Ok(false);
    }

    let mut view = CatalogView::new(sort, args.view.unwrap_or(catalog_config.view));
    view.search = args.search.unwrap_or_default();
    write!(out, "{}", view.render(&app.services.catalog.snapshot()))?;
    Ok(true)
}

async fn submit<W: Write>(
    app: &AppState,
    mut form: FormView,
    fields: &BookFields,
    out: &mut W,
) -> anyhow::Result<bool> {
    fields.apply(&mut form);

    let Some(submission) = form.submit() else {
        write!(out, "{}", form.render())?;
        for (field, message) in form.errors().iter() {
            writeln!(out, "error: {}: {}", field.label(), message)?;
        }
        return Ok(false);
    };

    let catalog = &app.services.catalog;
    let saved = match submission {
        FormSubmission::Create(payload) => catalog.create_book(payload).await,
        FormSubmission::Update { id, payload } => catalog.update_book(&id, payload).await,
    };

    match saved {
        Some(book) => {
            write!(out, "{}", book_card::render_details(&book))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

async fn delete<W: Write>(
    app: &AppState,
    id: &str,
    yes: bool,
    out: &mut W,
) -> anyhow::Result<bool> {
    if !yes {
        let book = app.services.catalog.get_book(id).await;
        write!(out, "{}", confirm::render_prompt(book.as_ref()))?;
        out.flush()?;

        let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()));
        let answer = prompter.read_line().await?;
        if !answer.as_deref().is_some_and(confirm::is_confirmed) {
            writeln!(out, "Deletion cancelled.")?;
            return Ok(true);
        }
    }

    Ok(app.services.catalog.delete_book(id).await)
}
