#![forbid(unsafe_code)]

//! Visual and interaction state of an input field.

use std::fmt;

/// The state an [`InputField`](crate::InputField) is rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Idle and accepting interaction.
    #[default]
    Enabled,
    /// Not interactive.
    Disabled,
    /// Currently being edited.
    Selected,
    /// Showing a failure, with an optional message for the hint line.
    Failed(Option<String>),
}

impl FieldState {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Selected => "selected",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns `true` for `Failed`, with or without a message.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` for `Disabled`.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The failure message, if the state is `Failed` and has one.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => message.as_deref(),
            _ => None,
        }
    }

    /// Text for the hint line in this state.
    ///
    /// A failure message only replaces the hint when a hint exists. Fields
    /// without a hint keep an empty hint line even when failed.
    #[must_use]
    pub fn displayed_hint<'a>(&'a self, hint: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::Failed(message) => hint.and(message.as_deref().or(hint)),
            _ => hint,
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
