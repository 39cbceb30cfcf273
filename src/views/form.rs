//! Create/edit form screen

use crate::models::{Book, BookCreate, BookForm, BookUpdate, FieldErrors, FormField};

/// What a valid submission turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(BookCreate),
    Update { id: String, payload: BookUpdate },
}

/// Form state: the text being edited, the record it came from and the
/// errors of the last submit attempt
#[derive(Debug, Clone, Default)]
pub struct FormView {
    editing: Option<Book>,
    data: BookForm,
    errors: FieldErrors,
}

impl FormView {
    pub fn new_book() -> Self {
        Self::default()
    }

    pub fn edit(book: Book) -> Self {
        Self {
            data: BookForm::from_book(&book),
            editing: Some(book),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit book"
        } else {
            "New book"
        }
    }

    pub fn description(&self) -> &'static str {
        if self.is_editing() {
            "Update the book details"
        } else {
            "Fill in the details to register a new book"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Save changes"
        } else {
            "Register book"
        }
    }

    pub fn data(&self) -> &BookForm {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Change a field; its previous error no longer applies
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear(field);
    }

    /// Validate and build the request; keeps the errors for rendering otherwise
    pub fn submit(&mut self) -> Option<FormSubmission> {
        match self.data.submit() {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                Some(match &self.editing {
                    Some(book) => FormSubmission::Update {
                        id: book.id.clone(),
                        payload: payload.into_update(),
                    },
                    None => FormSubmission::Create(payload),
                })
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n\n", self.heading(), self.description());
        for field in FormField::ALL {
            out.push_str(&format!("  {:<22} {}\n", field.label(), self.data.get(field)));
            if field == FormField::Authors {
                out.push_str(&format!("  {:<22} Separate multiple authors with commas\n", ""));
            }
            if let Some(message) = self.errors.get(field) {
                out.push_str(&format!("  {:<22} ! {}\n", "", message));
            }
        }
        out.push_str(&format!("\n[{}]  [Cancel]\n", self.submit_label()));
        out
    }
}
