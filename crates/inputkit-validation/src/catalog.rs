#![forbid(unsafe_code)]

//! Lookup table from error codes to display strings.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ERROR_CODE_INVALID, ERROR_CODE_MISMATCH, ERROR_CODE_REQUIRED};

/// Maps [`ValidationError::code`](crate::ValidationError::code) values to
/// localized messages.
///
/// `MessageCatalog::new()` carries the English defaults. Hosts layer their own
/// translations on top with [`with_entry`](Self::with_entry) or by loading a
/// flat JSON object:
///
/// ```rust
/// use inputkit_validation::MessageCatalog;
///
/// let catalog = MessageCatalog::from_json_str(r#"{ "required": "Povinné" }"#).unwrap();
/// assert_eq!(catalog.lookup("required"), Some("Povinné"));
/// assert_eq!(catalog.lookup("invalid"), Some("Invalid"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCatalog {
    /// Catalog with the default English messages.
    #[must_use]
    pub fn new() -> Self {
        Self::empty()
            .with_entry(ERROR_CODE_INVALID, "Invalid")
            .with_entry(ERROR_CODE_REQUIRED, "Required")
            .with_entry(ERROR_CODE_MISMATCH, "Mismatch")
    }

    /// Catalog with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the message for `code`.
    #[must_use]
    pub fn with_entry(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(code, message);
        self
    }

    /// Add or replace the message for `code` in place.
    pub fn insert(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(code.into(), message.into());
    }

    /// Message for `code`, if any.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load entries from a flat JSON object of strings, layered over the
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.merge_json_str(json)?;
        Ok(catalog)
    }

    /// Merge entries from a flat JSON object of strings into this catalog.
    ///
    /// Nothing is merged if any value is not a string.
    pub fn merge_json_str(&mut self, json: &str) -> Result<(), CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut loaded = Vec::with_capacity(map.len());
        for (code, message) in map {
            match message {
                serde_json::Value::String(text) => loaded.push((code, text)),
                _ => return Err(CatalogError::NonStringEntry(code)),
            }
        }

        tracing::debug!(entries = loaded.len(), "merging message catalog");
        self.entries.extend(loaded);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Failure while loading a [`MessageCatalog`].
#[derive(Debug)]
pub enum CatalogError {
    /// The input was not valid JSON.
    Json(serde_json::Error),
    /// The top-level JSON value was not an object.
    NotAnObject,
    /// The entry under this code was not a string.
    NonStringEntry(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid catalog json: {err}"),
            Self::NotAnObject => write!(f, "catalog must be a json object"),
            Self::NonStringEntry(code) => write!(f, "catalog entry {code:?} is not a string"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tag_names() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.lookup("invalid"), Some("Invalid"));
        assert_eq!(catalog.lookup("required"), Some("Required"));
        assert_eq!(catalog.lookup("mismatch"), Some("Mismatch"));
        assert_eq!(catalog.lookup("external"), None);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn empty_has_nothing() {
        let catalog = MessageCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.lookup("invalid"), None);
    }

    #[test]
    fn with_entry_overrides() {
        let catalog = MessageCatalog::new().with_entry("invalid", "Neplatné");
        assert_eq!(catalog.lookup("invalid"), Some("Neplatné"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn json_layers_over_defaults() {
        let catalog =
            MessageCatalog::from_json_str(r#"{"mismatch": "Passwords differ", "custom": "x"}"#)
                .unwrap();
        assert_eq!(catalog.lookup("mismatch"), Some("Passwords differ"));
        assert_eq!(catalog.lookup("required"), Some("Required"));
        assert_eq!(catalog.lookup("custom"), Some("x"));
    }

    #[test]
    fn json_must_be_object() {
        let err = MessageCatalog::from_json_str(r#"["invalid"]"#).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject));
    }

    #[test]
    fn json_rejects_non_string_values_atomically() {
        let mut catalog = MessageCatalog::new();
        let err = catalog
            .merge_json_str(r#"{"invalid": "Bad", "required": 3}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::NonStringEntry(ref code) if code == "required"));
        assert_eq!(catalog.lookup("invalid"), Some("Invalid"));
    }

    #[test]
    fn json_syntax_error_is_reported() {
        let err = MessageCatalog::from_json_str("{").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
        assert!(err.to_string().starts_with("invalid catalog json"));
    }
}
