#![forbid(unsafe_code)]

//! Headless input field model.
//!
//! An [`InputField`] tracks text, [`FieldState`], keyboard
//! [`InputFieldTraits`] and an optional validation [`Criterion`]. It draws
//! nothing; hosts read its state and drain its [`FieldEvent`] queue after
//! each call.
//!
//! [`Criterion`]: inputkit_validation::Criterion

mod field;
mod state;
mod traits;

pub use field::{FieldError, FieldEvent, FieldModel, FocusOutcome, Haptic, InputField};
pub use state::FieldState;
pub use traits::{
    Autocapitalization, Autocorrection, ClearButtonMode, InputFieldTraits, KeyboardType,
    ReturnKey, TextContentType,
};
