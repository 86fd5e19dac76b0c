//! # Hypermedia Contacts
//!
//! A server-rendered contact manager: people (name, phone, email) stored in
//! SQLite, case-insensitive substring search, and CRUD through HTML pages
//! and `303` redirects meant for hypermedia clients.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────────────┐   ┌──────────┐
//! │   HTTP   │──▶│          │   │                   │   │          │
//! │  (axum)  │   │ Contact  │──▶│   ContactStore    │──▶│  SQLite  │
//! ├──────────┤   │Operations│   │ (SQLite / memory) │   │          │
//! │   CLI    │──▶│          │   │                   │   │          │
//! └──────────┘   └──────────┘   └───────────────────┘   └──────────┘
//! ```
//!
//! The model, store trait, in-memory store, and request policy live in the
//! `contacts-core` crate; this crate adds the SQLite backend and the
//! boundary.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool |
//! | [`migrate`] | Schema creation (idempotent) |
//! | [`sqlite_store`] | SQLite [`ContactStore`](contacts_core::ContactStore) |
//! | [`render`] | `Renderer` collaborator and the default HTML renderer |
//! | [`server`] | Axum router and server entry points |
//! | [`commands`] | CLI command implementations |
//! | [`logging`] | `tracing` subscriber setup |

pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod migrate;
pub mod render;
pub mod server;
pub mod sqlite_store;

pub use contacts_core::{store, Contact, ContactError, ContactForm, ContactOperations};
