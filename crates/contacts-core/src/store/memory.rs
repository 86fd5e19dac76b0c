//! In-memory [`ContactStore`] implementation for tests and embedding.
//!
//! Uses a `BTreeMap` keyed by id behind `std::sync::RwLock`, so iteration is
//! already in id order. Each operation holds the lock for its whole duration.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{ContactError, Result};
use crate::models::{Contact, ContactForm};

use super::{ContactStore, SEARCH_LIMIT};

struct State {
    /// Last id handed out. Not decremented on delete.
    last_id: i64,
    rows: BTreeMap<i64, Contact>,
}

/// In-memory contact store.
pub struct InMemoryContactStore {
    state: RwLock<State>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| ContactError::storage("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| ContactError::storage("in-memory store lock poisoned"))
    }
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn insert(&mut self, form: &ContactForm) -> i64 {
        self.last_id += 1;
        let id = self.last_id;
        self.rows.insert(id, Contact::from_form(id, form.clone()));
        id
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn initialize(&self) -> Result<()> {
        let mut state = self.write()?;
        if state.rows.is_empty() {
            let id = state.insert(&ContactForm::placeholder());
            tracing::info!(id, "seeded placeholder contact");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Contact>> {
        let needle = term.trim().to_lowercase();
        let state = self.read()?;
        Ok(state
            .rows
            .values()
            .filter(|c| c.matches_lowercase(&needle))
            .take(SEARCH_LIMIT)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact> {
        self.read()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(ContactError::NotFound(id))
    }

    async fn create(&self, form: &ContactForm) -> Result<i64> {
        Ok(self.write()?.insert(form))
    }

    async fn update(&self, id: i64, form: &ContactForm) -> Result<()> {
        let mut state = self.write()?;
        match state.rows.get_mut(&id) {
            Some(row) => {
                *row = Contact::from_form(id, form.clone());
                Ok(())
            }
            None => Err(ContactError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> ContactForm {
        ContactForm::new("Foo", "Bar", "Baz", "Foz")
    }

    #[tokio::test]
    async fn test_create_on_empty_store_assigns_id_one() {
        let store = InMemoryContactStore::new();
        let id = store.create(&foo()).await.unwrap();
        assert_eq!(id, 1);

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![Contact::from_form(1, foo())]);
    }

    #[tokio::test]
    async fn test_get_after_create_returns_input() {
        let store = InMemoryContactStore::new();
        let form = ContactForm::new("Grace", "Hopper", "555-1906", "grace@navy.mil");
        let id = store.create(&form).await.unwrap();
        assert_eq!(store.get_by_id(id).await.unwrap(), Contact::from_form(id, form));
    }

    #[tokio::test]
    async fn test_create_accepts_all_empty_fields() {
        let store = InMemoryContactStore::new();
        let id = store.create(&ContactForm::default()).await.unwrap();
        let c = store.get_by_id(id).await.unwrap();
        assert_eq!(c.first_name, "");
        assert_eq!(c.email, "");
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = InMemoryContactStore::new();
        let a = store.create(&foo()).await.unwrap();
        let b = store.create(&foo()).await.unwrap();
        store.delete(b).await.unwrap();
        let c = store.create(&foo()).await.unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = InMemoryContactStore::new();
        let id = store.create(&foo()).await.unwrap();
        store.delete(id).await.unwrap();
        assert_eq!(store.get_by_id(id).await, Err(ContactError::NotFound(id)));
    }

    #[tokio::test]
    async fn test_missing_id_semantics() {
        let store = InMemoryContactStore::new();
        assert_eq!(
            store.get_by_id(99999).await,
            Err(ContactError::NotFound(99999))
        );
        assert_eq!(
            store.update(99999, &foo()).await,
            Err(ContactError::NotFound(99999))
        );
        assert!(store.delete(99999).await.is_ok());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let store = InMemoryContactStore::new();
        let id = store.create(&foo()).await.unwrap();
        let replacement = ContactForm::new("A", "B", "C", "D");
        store.update(id, &replacement).await.unwrap();
        assert_eq!(
            store.get_by_id(id).await.unwrap(),
            Contact::from_form(id, replacement)
        );
    }

    #[tokio::test]
    async fn test_search_case_insensitive_and_trimmed() {
        let store = InMemoryContactStore::new();
        store.create(&foo()).await.unwrap();

        assert_eq!(store.search("foo").await.unwrap().len(), 1);
        assert_eq!(store.search("  FOZ  ").await.unwrap().len(), 1);
        assert!(store.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_term_matches_everything() {
        let store = InMemoryContactStore::new();
        store.create(&foo()).await.unwrap();
        store.create(&ContactForm::new("x", "y", "z", "w")).await.unwrap();

        assert_eq!(store.search("").await.unwrap(), store.list_all().await.unwrap());
        assert_eq!(store.search("   ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let store = InMemoryContactStore::new();
        for i in 0..(SEARCH_LIMIT + 10) {
            store
                .create(&ContactForm::new(format!("user{i}"), "", "", ""))
                .await
                .unwrap();
        }
        let hits = store.search("user").await.unwrap();
        assert_eq!(hits.len(), SEARCH_LIMIT);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits, store.search("user").await.unwrap());
    }

    #[tokio::test]
    async fn test_initialize_seeds_once() {
        let store = InMemoryContactStore::new();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![Contact::from_form(1, ContactForm::placeholder())]);
    }

    #[tokio::test]
    async fn test_initialize_skips_seed_when_not_empty() {
        let store = InMemoryContactStore::new();
        store.create(&ContactForm::new("Ada", "", "", "")).await.unwrap();
        store.initialize().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
