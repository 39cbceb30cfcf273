//! Terminal presentation of the catalog.
//!
//! Views only read store snapshots and produce text; all network access goes
//! through the services.

pub mod book_card;
pub mod catalog;
pub mod confirm;
pub mod form;
pub mod instructions;

pub use catalog::CatalogView;
pub use form::{FormSubmission, FormView};
