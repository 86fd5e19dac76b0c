//! CLI command implementations.
//!
//! Each `run_*` function opens the configured store, delegates to
//! [`ContactOperations`], and prints the result to stdout. Errors bubble up
//! to `main` so the process exits non-zero.

use anyhow::Result;
use std::sync::Arc;

use contacts_core::models::{Contact, ContactForm};
use contacts_core::operations::{ContactOperations, Outcome};
use contacts_core::store::ContactStore;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteContactStore;

/// Connect to the database, run the idempotent initialization, and wrap the
/// store in the operations layer.
pub async fn open_operations(config: &Config) -> Result<ContactOperations> {
    let pool = db::connect(&config.db).await?;
    let store = Arc::new(SqliteContactStore::new(pool));
    store.initialize().await?;
    Ok(ContactOperations::new(store))
}

pub async fn run_init(config: &Config) -> Result<()> {
    open_operations(config).await?;
    println!("Database initialized successfully.");
    Ok(())
}

pub async fn run_list(config: &Config, query: Option<&str>, json: bool) -> Result<()> {
    let ops = open_operations(config).await?;
    let list = ops.list_or_search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if let Some(term) = &list.search_term {
        println!("Search: \"{}\" ({} results)", term, list.contacts.len());
    }
    println!(
        "{:<6} {:<16} {:<16} {:<16} EMAIL",
        "ID", "FIRST", "LAST", "PHONE"
    );
    for c in &list.contacts {
        println!(
            "{:<6} {:<16} {:<16} {:<16} {}",
            c.id, c.first_name, c.last_name, c.phone, c.email
        );
    }
    Ok(())
}

pub async fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let ops = open_operations(config).await?;
    let contact = ops.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        print_contact(&contact);
    }
    Ok(())
}

pub async fn run_add(config: &Config, form: ContactForm) -> Result<()> {
    let ops = open_operations(config).await?;
    if let Outcome::Created { id, flash } = ops.create(form).await? {
        println!("{} (id {})", flash, id);
    }
    Ok(())
}

/// Empty fields in `form` keep their stored values.
pub async fn run_edit(config: &Config, id: &str, form: ContactForm) -> Result<()> {
    let ops = open_operations(config).await?;
    ops.edit(id, form).await?;
    let contact = ops.get(id).await?;
    println!("Updated contact {}", contact.id);
    print_contact(&contact);
    Ok(())
}

pub async fn run_delete(config: &Config, id: &str) -> Result<()> {
    let ops = open_operations(config).await?;
    if let Outcome::Deleted { id } = ops.delete(id).await? {
        println!("Deleted contact {}", id);
    }
    Ok(())
}

fn print_contact(contact: &Contact) {
    println!("id:         {}", contact.id);
    println!("first_name: {}", contact.first_name);
    println!("last_name:  {}", contact.last_name);
    println!("phone:      {}", contact.phone);
    println!("email:      {}", contact.email);
}
