//! Line-based prompting over any async reader

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    error::AppResult,
    models::FormField,
    views::{FormSubmission, FormView},
};

/// Typing this at any form prompt abandons the form
pub const CANCEL: &str = "cancel";

pub struct Prompter<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next input line, `None` at end of input
    pub async fn read_line(&mut self) -> AppResult<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    pub async fn ask<W: Write>(&mut self, out: &mut W, question: &str) -> AppResult<Option<String>> {
        write!(out, "{}", question)?;
        out.flush()?;
        self.read_line().await
    }

    /// Walk the user through the form until it validates.
    ///
    /// Enter keeps a field's current value and `-` clears it. After a failed
    /// submit only the failing fields are asked again. Returns `None` when
    /// the user cancels or input ends. The form keeps what was typed so a
    /// caller can offer it again.
    pub async fn fill_form<W: Write>(
        &mut self,
        out: &mut W,
        form: &mut FormView,
    ) -> AppResult<Option<FormSubmission>> {
        writeln!(out, "{}", form.heading())?;
        writeln!(out, "{}", form.description())?;
        writeln!(
            out,
            "(Enter keeps the current value, '-' clears it, '{}' aborts)",
            CANCEL
        )?;

        let mut pending: Vec<FormField> = FormField::ALL.to_vec();
        loop {
            for field in pending {
                let current = form.data().get(field);
                let question = if current.is_empty() {
                    format!("{}: ", field.label())
                } else {
                    format!("{} [{}]: ", field.label(), current)
                };

                let Some(answer) = self.ask(out, &question).await? else {
                    writeln!(out)?;
                    return Ok(None);
                };
                let answer = answer.trim();
                if answer.eq_ignore_ascii_case(CANCEL) {
                    writeln!(out, "Cancelled.")?;
                    return Ok(None);
                }
                if answer == "-" {
                    form.set_field(field, "");
                } else if !answer.is_empty() {
                    form.set_field(field, answer);
                }
            }

            match form.submit() {
                Some(submission) => return Ok(Some(submission)),
                None => {
                    write!(out, "\n{}", form.render())?;
                    writeln!(out, "Please fix the fields marked with '!'.")?;
                    pending = form.errors().fields().collect();
                }
            }
        }
    }
}
