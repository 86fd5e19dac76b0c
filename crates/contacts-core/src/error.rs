//! Error taxonomy for contact storage and request handling.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, ContactError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// No contact has this id.
    #[error("contact not found: {0}")]
    NotFound(i64),

    /// The id token in the request is not an integer.
    #[error("invalid contact id: {0:?}")]
    InvalidId(String),

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ContactError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        ContactError::Storage(err.to_string())
    }

    /// Client-input errors (unknown or malformed id) as opposed to faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ContactError::NotFound(_) | ContactError::InvalidId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_found() {
        assert_eq!(ContactError::NotFound(42).to_string(), "contact not found: 42");
    }

    #[test]
    fn test_display_invalid_id() {
        let msg = ContactError::InvalidId("abc".to_string()).to_string();
        assert!(msg.contains("invalid contact id"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ContactError::NotFound(1).is_client_error());
        assert!(ContactError::InvalidId("x".into()).is_client_error());
        assert!(!ContactError::storage("disk full").is_client_error());
    }
}
