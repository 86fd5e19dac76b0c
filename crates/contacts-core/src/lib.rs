//! # Contacts Core
//!
//! Runtime-agnostic logic for Hypermedia Contacts: the [`models::Contact`]
//! entity, the [`store::ContactStore`] abstraction with an in-memory
//! backend, and the request-level policy in [`operations`].
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. The SQLite backend
//! and the HTTP/CLI boundary live in the `hypermedia-contacts` package.

pub mod error;
pub mod models;
pub mod operations;
pub mod store;

pub use error::{ContactError, Result};
pub use models::{Contact, ContactForm};
pub use operations::{ContactList, ContactOperations, Outcome};
pub use store::ContactStore;
