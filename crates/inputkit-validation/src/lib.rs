#![forbid(unsafe_code)]

//! Composable validation criteria for input fields.
//!
//! A [`Criterion`] is a predicate over an optional string paired with the
//! [`ValidationError`] it reports on failure. Criteria are immutable values:
//! combinators build new ones instead of editing existing ones, so a rule can
//! be shared across fields and threads.
//!
//! - Built-ins: [`Criterion::always_valid`], [`Criterion::always_error`],
//!   [`Criterion::non_empty`], [`Criterion::matches`], [`Criterion::email`],
//!   [`Criterion::zip_code`]
//! - Combinators: [`Criterion::accept_empty`], [`Criterion::fail_with`]
//! - Bridges to outside state: [`Criterion::external`], [`Criterion::matches_in`]
//! - Message lookup for the tag variants: [`MessageCatalog`]
//!
//! # Example
//!
//! ```rust
//! use inputkit_validation::{Criterion, MessageCatalog, ValidationError};
//!
//! let email: Criterion = Criterion::accept_empty(Criterion::email());
//! assert!(email.validate(None));
//! assert!(email.validate("user@example.com"));
//!
//! let required: Criterion = Criterion::non_empty();
//! let result = required.check("   ");
//! assert_eq!(result.error(), Some(&ValidationError::Required));
//! assert_eq!(
//!     result.message_in(&(), &MessageCatalog::new()).as_deref(),
//!     Some("Required")
//! );
//! ```
//!
//! # Owning context
//!
//! Rules that depend on state outside the input, such as an error reported by
//! a server, receive that state through an explicit context parameter `C`.
//! The caller that owns `C` passes it to [`Criterion::validate_in`], so the
//! supplier only ever runs where that state lives.

mod builtins;
mod catalog;
mod criterion;
mod error;

pub use builtins::{is_email, is_non_empty, is_zip_code};
pub use catalog::{CatalogError, MessageCatalog};
pub use criterion::{Criterion, PatternError};
pub use error::{
    ERROR_CODE_EXTERNAL, ERROR_CODE_INVALID, ERROR_CODE_MISMATCH, ERROR_CODE_REQUIRED,
    EXTERNAL_FALLBACK_MESSAGE, ExternalMessage, ValidationError, ValidationResult,
};
