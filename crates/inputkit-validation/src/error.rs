#![forbid(unsafe_code)]

//! Failure descriptors and validation results.

use std::fmt;
use std::sync::Arc;

use crate::catalog::MessageCatalog;

// ---------------------------------------------------------------------------
// Error Codes (for catalog lookup)
// ---------------------------------------------------------------------------

/// Error code for the generic failure.
pub const ERROR_CODE_INVALID: &str = "invalid";
/// Error code for empty input where a value is required.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a failed comparison.
pub const ERROR_CODE_MISMATCH: &str = "mismatch";
/// Error code for a message supplied by an external source.
pub const ERROR_CODE_EXTERNAL: &str = "external";

/// Message used when an external supplier reports a failure without text.
pub const EXTERNAL_FALLBACK_MESSAGE: &str = " ";

// ---------------------------------------------------------------------------
// ExternalMessage
// ---------------------------------------------------------------------------

/// A lazily evaluated message supplier bound to an owning context `C`.
///
/// The supplier runs only when the message is resolved, and only with a
/// context reference handed in by the caller that owns that context.
pub struct ExternalMessage<C = ()> {
    supplier: Arc<dyn Fn(&C) -> String + Send + Sync>,
}

impl<C> ExternalMessage<C> {
    /// Wrap a message supplier.
    #[must_use]
    pub fn new(supplier: impl Fn(&C) -> String + Send + Sync + 'static) -> Self {
        Self {
            supplier: Arc::new(supplier),
        }
    }

    /// Invoke the supplier against `ctx`.
    #[must_use]
    pub fn resolve(&self, ctx: &C) -> String {
        (self.supplier)(ctx)
    }
}

impl<C> Clone for ExternalMessage<C> {
    fn clone(&self) -> Self {
        Self {
            supplier: Arc::clone(&self.supplier),
        }
    }
}

impl<C> PartialEq for ExternalMessage<C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.supplier, &other.supplier)
    }
}

impl<C> fmt::Debug for ExternalMessage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalMessage(..)")
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Why a criterion rejected its input.
///
/// The tag variants are turned into text through a [`MessageCatalog`] keyed
/// by [`ValidationError::code`]. `External` carries its own supplier and is
/// resolved against the owning context only when the failure is reported.
///
/// # Example
///
/// ```rust
/// use inputkit_validation::{MessageCatalog, ValidationError};
///
/// let catalog = MessageCatalog::new().with_entry("required", "Please fill this in");
/// let required: ValidationError = ValidationError::Required;
/// assert_eq!(required.resolve(&catalog), "Please fill this in");
///
/// let taken: ValidationError = ValidationError::message("Taken");
/// assert_eq!(taken.resolve(&catalog), "Taken");
/// ```
pub enum ValidationError<C = ()> {
    /// Generic failure.
    Invalid,
    /// The input was empty.
    Required,
    /// The input did not equal the expected value.
    Mismatch,
    /// Message delegated to an external source.
    External(ExternalMessage<C>),
}

impl<C> ValidationError<C> {
    /// Build an `External` descriptor from a context-aware supplier.
    #[must_use]
    pub fn external(supplier: impl Fn(&C) -> String + Send + Sync + 'static) -> Self {
        Self::External(ExternalMessage::new(supplier))
    }

    /// Build an `External` descriptor that always yields `text`.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::external(move |_| text.clone())
    }

    /// Stable code used as the catalog key.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid => ERROR_CODE_INVALID,
            Self::Required => ERROR_CODE_REQUIRED,
            Self::Mismatch => ERROR_CODE_MISMATCH,
            Self::External(_) => ERROR_CODE_EXTERNAL,
        }
    }

    /// Returns `true` for the `External` variant.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Resolve the display text.
    ///
    /// Tag variants come from `catalog`, falling back to the code itself when
    /// the catalog has no entry. `External` invokes its supplier with `ctx`.
    #[must_use]
    pub fn resolve_in(&self, ctx: &C, catalog: &MessageCatalog) -> String {
        match self {
            Self::External(message) => message.resolve(ctx),
            tag => catalog
                .lookup(tag.code())
                .unwrap_or_else(|| tag.code())
                .to_string(),
        }
    }
}

impl ValidationError<()> {
    /// Resolve the display text for a context-free descriptor.
    #[must_use]
    pub fn resolve(&self, catalog: &MessageCatalog) -> String {
        self.resolve_in(&(), catalog)
    }
}

impl<C> Default for ValidationError<C> {
    fn default() -> Self {
        Self::Invalid
    }
}

impl<C> Clone for ValidationError<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Invalid => Self::Invalid,
            Self::Required => Self::Required,
            Self::Mismatch => Self::Mismatch,
            Self::External(message) => Self::External(message.clone()),
        }
    }
}

impl<C> PartialEq for ValidationError<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::External(a), Self::External(b)) => a == b,
            (a, b) => a.code() == b.code(),
        }
    }
}

impl<C> fmt::Debug for ValidationError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => f.write_str("Invalid"),
            Self::Required => f.write_str("Required"),
            Self::Mismatch => f.write_str("Mismatch"),
            Self::External(message) => f.debug_tuple("External").field(message).finish(),
        }
    }
}

impl fmt::Display for ValidationError<()> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve(&MessageCatalog::new()))
    }
}

impl std::error::Error for ValidationError<()> {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The outcome of checking a criterion, with the descriptor on failure.
pub enum ValidationResult<C = ()> {
    /// The input was accepted.
    Valid,
    /// The input was rejected.
    Invalid(ValidationError<C>),
}

impl<C> ValidationResult<C> {
    /// Whether the criterion accepted the input.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    /// Whether the field should show a failure.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.error().is_some()
    }

    /// What the criterion reported, if it rejected the input.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError<C>> {
        if let Self::Invalid(error) = self {
            Some(error)
        } else {
            None
        }
    }

    /// Resolved failure text, or `None` when valid.
    #[must_use]
    pub fn message_in(&self, ctx: &C, catalog: &MessageCatalog) -> Option<String> {
        self.error().map(|e| e.resolve_in(ctx, catalog))
    }

    /// Both checks must pass. The earlier failure is the one reported.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self.is_invalid() { self } else { other }
    }

    /// One passing check is enough. When both fail, `other` is reported.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        if self.is_valid() { self } else { other }
    }
}

impl<C> Default for ValidationResult<C> {
    fn default() -> Self {
        Self::Valid
    }
}

impl<C> Clone for ValidationResult<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Valid => Self::Valid,
            Self::Invalid(e) => Self::Invalid(e.clone()),
        }
    }
}

impl<C> PartialEq for ValidationResult<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Valid, Self::Valid) => true,
            (Self::Invalid(a), Self::Invalid(b)) => a == b,
            _ => false,
        }
    }
}

impl<C> fmt::Debug for ValidationResult<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("Valid"),
            Self::Invalid(e) => f.debug_tuple("Invalid").field(e).finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
