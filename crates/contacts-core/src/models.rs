//! Contact data types shared by every store backend and the boundary.

use serde::{Deserialize, Serialize};

/// A stored person record.
///
/// `id` is assigned by the store on creation and never changes afterwards.
/// Callers always hold owned copies; mutating one has no effect on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// The four free-text fields of a contact, without an id.
///
/// Missing form fields deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl ContactForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// The record inserted by `initialize` into an empty collection.
    pub fn placeholder() -> Self {
        Self::new("Foo", "Bar", "Baz", "Foz")
    }

    /// Resolves a partial edit against the stored contact: every empty field
    /// keeps the existing value.
    pub fn or_existing(self, existing: &Contact) -> Self {
        fn pick(submitted: String, current: &str) -> String {
            if submitted.is_empty() {
                current.to_string()
            } else {
                submitted
            }
        }

        Self {
            first_name: pick(self.first_name, &existing.first_name),
            last_name: pick(self.last_name, &existing.last_name),
            phone: pick(self.phone, &existing.phone),
            email: pick(self.email, &existing.email),
        }
    }
}

impl Contact {
    pub fn from_form(id: i64, form: ContactForm) -> Self {
        Self {
            id,
            first_name: form.first_name,
            last_name: form.last_name,
            phone: form.phone,
            email: form.email,
        }
    }

    /// True if any field contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.first_name, &self.last_name, &self.phone, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Contact {
        Contact::from_form(7, ContactForm::new("Ada", "Lovelace", "555-0100", "ada@example.com"))
    }

    #[test]
    fn test_or_existing_all_blank_keeps_everything() {
        let resolved = ContactForm::default().or_existing(&existing());
        assert_eq!(
            resolved,
            ContactForm::new("Ada", "Lovelace", "555-0100", "ada@example.com")
        );
    }

    #[test]
    fn test_or_existing_replaces_only_submitted_fields() {
        let form = ContactForm {
            phone: "555-0199".to_string(),
            ..ContactForm::default()
        };
        let resolved = form.or_existing(&existing());
        assert_eq!(resolved.first_name, "Ada");
        assert_eq!(resolved.last_name, "Lovelace");
        assert_eq!(resolved.phone, "555-0199");
        assert_eq!(resolved.email, "ada@example.com");
    }

    #[test]
    fn test_or_existing_whitespace_counts_as_provided() {
        let form = ContactForm {
            first_name: " ".to_string(),
            ..ContactForm::default()
        };
        assert_eq!(form.or_existing(&existing()).first_name, " ");
    }

    #[test]
    fn test_matches_lowercase_any_field() {
        let c = existing();
        assert!(c.matches_lowercase("love"));
        assert!(c.matches_lowercase("example.com"));
        assert!(c.matches_lowercase("0100"));
        assert!(c.matches_lowercase(""));
        assert!(!c.matches_lowercase("babbage"));
    }
}
