//! SQLite-backed [`ContactStore`] implementation.
//!
//! Every operation is a single SQL statement against the `contacts` table,
//! so each one is atomic without an explicit transaction. `initialize` is the
//! only multi-statement call; it runs the migration and the conditional seed
//! inside one transaction.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use contacts_core::error::{ContactError, Result};
use contacts_core::models::{Contact, ContactForm};
use contacts_core::store::{ContactStore, SEARCH_LIMIT};

use crate::migrate;

/// SQLite implementation of the [`ContactStore`] trait.
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_contact(row: &sqlx::sqlite::SqliteRow) -> Contact {
    Contact {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        phone: row.get("phone"),
        email: row.get("email"),
    }
}

/// Build a `LIKE` pattern that matches `term` as a literal substring.
///
/// The term keeps its case: `LIKE` folds ASCII letters itself, and folding
/// non-ASCII letters here would stop them matching their stored form.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn initialize(&self) -> Result<()> {
        migrate::run_migrations(&self.pool)
            .await
            .map_err(ContactError::storage)?;

        let mut tx = self.pool.begin().await.map_err(ContactError::storage)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&mut *tx)
            .await
            .map_err(ContactError::storage)?;

        if count == 0 {
            let seed = ContactForm::placeholder();
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO contacts (first_name, last_name, phone, email) VALUES (?, ?, ?, ?) RETURNING id",
            )
            .bind(&seed.first_name)
            .bind(&seed.last_name)
            .bind(&seed.phone)
            .bind(&seed.email)
            .fetch_one(&mut *tx)
            .await
            .map_err(ContactError::storage)?;
            tracing::info!(id, "seeded placeholder contact");
        }

        tx.commit().await.map_err(ContactError::storage)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, phone, email FROM contacts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(ContactError::storage)?;

        Ok(rows.iter().map(row_to_contact).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Contact>> {
        let pattern = like_pattern(term.trim());

        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, phone, email
            FROM contacts
            WHERE first_name LIKE ? ESCAPE '\'
               OR last_name LIKE ? ESCAPE '\'
               OR phone LIKE ? ESCAPE '\'
               OR email LIKE ? ESCAPE '\'
            ORDER BY id ASC
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(SEARCH_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(ContactError::storage)?;

        Ok(rows.iter().map(row_to_contact).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, phone, email FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ContactError::storage)?;

        row.as_ref()
            .map(row_to_contact)
            .ok_or(ContactError::NotFound(id))
    }

    async fn create(&self, form: &ContactForm) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO contacts (first_name, last_name, phone, email) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.phone)
        .bind(&form.email)
        .fetch_one(&self.pool)
        .await
        .map_err(ContactError::storage)?;

        Ok(id)
    }

    async fn update(&self, id: i64, form: &ContactForm) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = ?, last_name = ?, phone = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.phone)
        .bind(&form.email)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(ContactError::storage)?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ContactError::storage)?;

        Ok(())
    }
}
