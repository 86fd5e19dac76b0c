//! Request-level policy applied before delegating to a [`ContactStore`].
//!
//! The boundary (HTTP router or CLI) hands raw request values to
//! [`ContactOperations`] and renders whatever comes back. Nothing here knows
//! about HTTP or templates.
//!
//! | Operation | Store calls | Result |
//! |-----------|-------------|--------|
//! | [`list_or_search`](ContactOperations::list_or_search) | `search` or `list_all` | [`ContactList`] |
//! | [`get`](ContactOperations::get) | `get_by_id` | [`Contact`] |
//! | [`create`](ContactOperations::create) | `create` | [`Outcome::Created`] |
//! | [`edit`](ContactOperations::edit) | `get_by_id`, `update` | [`Outcome::Updated`] |
//! | [`delete`](ContactOperations::delete) | `get_by_id`, `delete` | [`Outcome::Deleted`] |

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ContactError, Result};
use crate::models::{Contact, ContactForm};
use crate::store::ContactStore;

/// Confirmation message carried back to the list view after a create.
pub const CREATED_FLASH: &str = "Created New User";

/// Contacts for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactList {
    pub contacts: Vec<Contact>,
    /// The trimmed term, present only when a search actually ran.
    pub search_term: Option<String>,
}

/// Terminal result of a mutation, for the boundary to turn into a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created { id: i64, flash: String },
    Updated { id: i64 },
    Deleted { id: i64 },
}

/// Parse a path-carried id token as a signed 64-bit integer.
pub fn parse_id(token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| ContactError::InvalidId(token.to_string()))
}

/// Maps request intent onto store calls.
#[derive(Clone)]
pub struct ContactOperations {
    store: Arc<dyn ContactStore>,
}

impl ContactOperations {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Runs a search when `term` has non-whitespace content, otherwise lists
    /// every contact.
    pub async fn list_or_search(&self, term: Option<&str>) -> Result<ContactList> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => {
                let contacts = self.store.search(term).await?;
                debug!(term, hits = contacts.len(), "searched contacts");
                Ok(ContactList {
                    contacts,
                    search_term: Some(term.to_string()),
                })
            }
            None => {
                let contacts = self.store.list_all().await?;
                debug!(count = contacts.len(), "listed contacts");
                Ok(ContactList {
                    contacts,
                    search_term: None,
                })
            }
        }
    }

    pub async fn get(&self, id_token: &str) -> Result<Contact> {
        let id = parse_id(id_token).inspect_err(log_client_error)?;
        self.store.get_by_id(id).await.inspect_err(log_client_error)
    }

    /// Blank fields are stored as given; there is no validation.
    pub async fn create(&self, form: ContactForm) -> Result<Outcome> {
        let id = self.store.create(&form).await?;
        info!(id, "created contact");
        Ok(Outcome::Created {
            id,
            flash: CREATED_FLASH.to_string(),
        })
    }

    /// Updates a contact, keeping the stored value for every empty field.
    pub async fn edit(&self, id_token: &str, form: ContactForm) -> Result<Outcome> {
        let existing = self.get(id_token).await?;
        let resolved = form.or_existing(&existing);
        self.store.update(existing.id, &resolved).await?;
        info!(id = existing.id, "updated contact");
        Ok(Outcome::Updated { id: existing.id })
    }

    pub async fn delete(&self, id_token: &str) -> Result<Outcome> {
        let existing = self.get(id_token).await?;
        self.store.delete(existing.id).await?;
        info!(id = existing.id, "deleted contact");
        Ok(Outcome::Deleted { id: existing.id })
    }
}

fn log_client_error(err: &ContactError) {
    if err.is_client_error() {
        warn!(%err, "rejected contact request");
    }
}
