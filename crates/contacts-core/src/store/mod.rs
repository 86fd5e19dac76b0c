//! Storage abstraction for contacts.
//!
//! The [`ContactStore`] trait is the single owner of the contact collection.
//! Backends hand out owned copies and never expose their internal state.
//!
//! Implementations must be `Send + Sync` so one store can be shared across
//! concurrently running requests behind an `Arc`.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Contact, ContactForm};

/// Maximum number of contacts returned by [`ContactStore::search`].
pub const SEARCH_LIMIT: usize = 50;

/// Durable, queryable collection of contacts.
///
/// Every method is atomic on its own. There are no cross-call transactions:
/// a racing `update` and `delete` on the same id resolve as last write wins.
///
/// | Method | Missing id |
/// |--------|------------|
/// | [`get_by_id`](ContactStore::get_by_id) | `NotFound` |
/// | [`update`](ContactStore::update) | `NotFound` |
/// | [`delete`](ContactStore::delete) | silent no-op |
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Prepare the backend and seed [`ContactForm::placeholder`] if the
    /// collection is empty. Safe to call more than once.
    async fn initialize(&self) -> Result<()>;

    /// Every contact, in id order.
    async fn list_all(&self) -> Result<Vec<Contact>>;

    /// Case-insensitive substring match of the trimmed `term` against all
    /// four text fields, in id order, at most [`SEARCH_LIMIT`] entries.
    ///
    /// An empty trimmed term matches every contact.
    async fn search(&self, term: &str) -> Result<Vec<Contact>>;

    async fn get_by_id(&self, id: i64) -> Result<Contact>;

    /// Store a new contact and return its id. Ids are strictly increasing
    /// and are never handed out twice, even after a delete.
    async fn create(&self, form: &ContactForm) -> Result<i64>;

    /// Replace all four fields of an existing contact.
    async fn update(&self, id: i64, form: &ContactForm) -> Result<()>;

    async fn delete(&self, id: i64) -> Result<()>;
}
