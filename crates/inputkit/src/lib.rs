#![forbid(unsafe_code)]

//! inputkit public facade crate.
//!
//! Re-exports the validation criteria and the headless field model, and
//! offers a prelude for day-to-day usage.
//!
//! ```rust
//! use inputkit::prelude::*;
//!
//! fn signup_email() -> Result<InputField> {
//!     let traits = InputFieldTraits::from_json_str(r#"{ "keyboard": "email_address" }"#)?;
//!     let catalog = MessageCatalog::from_json_str(r#"{ "invalid": "Neplatný e-mail" }"#)?;
//!     Ok(InputField::new(FieldModel::new().with_traits(traits))?
//!         .with_criterion(Criterion::accept_empty(Criterion::email()))
//!         .with_catalog(catalog))
//! }
//!
//! let mut field = signup_email().unwrap();
//! field.begin_editing();
//! field.edit("someone@");
//! field.end_editing();
//! assert_eq!(field.state().failure_message(), Some("Neplatný e-mail"));
//! ```

use std::fmt;

// --- Validation re-exports -------------------------------------------------

pub use inputkit_validation::{
    CatalogError, Criterion, MessageCatalog, PatternError, ValidationError, ValidationResult,
};

// --- Field re-exports ------------------------------------------------------

#[cfg(feature = "field")]
pub use inputkit_field::{
    FieldError, FieldEvent, FieldModel, FieldState, FocusOutcome, Haptic, InputField,
    InputFieldTraits,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for inputkit setup.
#[derive(Debug)]
pub enum Error {
    /// A validation or text-limitation pattern did not compile.
    Pattern(PatternError),
    /// A message catalog could not be loaded.
    Catalog(CatalogError),
    /// Field configuration was rejected.
    #[cfg(feature = "field")]
    Field(FieldError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            #[cfg(feature = "field")]
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(err) => Some(err),
            Self::Catalog(err) => Some(err),
            #[cfg(feature = "field")]
            Self::Field(err) => Some(err),
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

#[cfg(feature = "field")]
impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Pattern(err) => Self::Pattern(err),
            other => Self::Field(other),
        }
    }
}

/// Standard result type for inputkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Criterion, Error, MessageCatalog, Result, ValidationError, ValidationResult};

    #[cfg(feature = "field")]
    pub use crate::{FieldEvent, FieldModel, FieldState, InputField, InputFieldTraits};

    #[cfg(feature = "field")]
    pub use crate::field;
    pub use crate::validation;
}

#[cfg(feature = "field")]
pub use inputkit_field as field;
pub use inputkit_validation as validation;
