#![forbid(unsafe_code)]

//! Headless input field: text, state machine, and validation.
//!
//! [`InputField`] owns everything about a text field except drawing it. The
//! host forwards platform callbacks (editing began, text changed, return
//! pressed, ...) to the matching method and then drains
//! [`take_events`](InputField::take_events) to learn what to do: play a
//! haptic, move focus, or publish the text to whoever listens.
//!
//! # Invariants
//!
//! 1. A field always has a state; there is no "unset" state.
//! 2. `Failed` is left only by editing, ending the edit, `unfail`,
//!    `set_enabled`, or a passing validation.
//! 3. `update_text` never touches the text while the field is `Selected`.
//! 4. Haptic events are queued only when the traits allow haptics.
//!
//! # Example
//!
//! ```rust
//! use inputkit_field::{FieldEvent, FieldModel, FieldState, InputField};
//! use inputkit_validation::Criterion;
//!
//! let mut field = InputField::new(FieldModel::new().with_hint("We never share it"))
//!     .unwrap()
//!     .with_criterion(Criterion::email());
//!
//! field.begin_editing();
//! field.edit("not-an-email");
//! field.end_editing();
//!
//! assert_eq!(field.state(), &FieldState::Failed(Some("Invalid".into())));
//! assert_eq!(field.displayed_hint(), Some("Invalid"));
//! assert!(field.take_events().contains(&FieldEvent::DidResign("not-an-email".into())));
//! ```

use std::fmt;

use inputkit_validation::{Criterion, MessageCatalog, PatternError};
use serde::{Deserialize, Serialize};

use crate::state::FieldState;
use crate::traits::{ClearButtonMode, InputFieldTraits};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Feedback the host should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Haptic {
    /// Light tick, played on return.
    Selection,
    /// Error notification, played when the field fails.
    Error,
}

/// Something the host should act on, queued by [`InputField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The text changed through editing or [`InputField::set_text`].
    EditingChanged(String),
    /// Editing is about to end; validation runs right after this.
    WillResign(String),
    /// Editing ended.
    DidResign(String),
    /// The return key (or the numeric pad's accessory button) was used.
    Return(String),
    /// Move focus to the linked next responder.
    FocusNext,
    /// Drop focus entirely.
    Resign,
    /// Play feedback.
    Haptic(Haptic),
    /// Secure text was masked or revealed.
    SecureEntryChanged { masked: bool },
}

/// Result of asking a field to take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// The field began editing.
    Focused,
    /// The field is disabled and focus passed to the next responder.
    ForwardedToNext,
    /// The field is disabled and there is nowhere to pass focus.
    Refused,
}

// ---------------------------------------------------------------------------
// FieldModel
// ---------------------------------------------------------------------------

/// Content used to set up an [`InputField`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldModel {
    /// Label shown above the field.
    pub title: Option<String>,
    /// Initial text. `None` starts empty.
    pub text: Option<String>,
    /// Shown while the text is empty.
    pub placeholder: Option<String>,
    /// Helper line under the field, replaced by failure messages.
    pub hint: Option<String>,
    pub traits: InputFieldTraits,
}

impl FieldModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_traits(mut self, traits: InputFieldTraits) -> Self {
        self.traits = traits;
        self
    }
}

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// Failure while configuring a field.
#[derive(Debug)]
pub enum FieldError {
    /// The traits' text limitation is not a valid pattern.
    Pattern(PatternError),
    /// Traits or model JSON could not be parsed.
    Traits(serde_json::Error),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(err) => write!(f, "text limitation: {err}"),
            Self::Traits(err) => write!(f, "field traits: {err}"),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(err) => Some(err),
            Self::Traits(err) => Some(err),
        }
    }
}

impl From<PatternError> for FieldError {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Traits(err)
    }
}

// ---------------------------------------------------------------------------
// InputField
// ---------------------------------------------------------------------------

/// A text field without a view.
#[derive(Debug, Clone)]
pub struct InputField {
    title: Option<String>,
    placeholder: Option<String>,
    hint: Option<String>,
    text: String,
    state: FieldState,
    traits: InputFieldTraits,
    limitation: Option<Criterion>,
    criterion: Option<Criterion>,
    catalog: MessageCatalog,
    is_enabled: bool,
    is_editing: bool,
    is_masked: bool,
    has_next_responder: bool,
    events: Vec<FieldEvent>,
}

impl InputField {
    /// Create a field from `model`, starting `Enabled`.
    pub fn new(model: FieldModel) -> Result<Self, FieldError> {
        let mut field = Self {
            title: None,
            placeholder: None,
            hint: None,
            text: String::new(),
            state: FieldState::Enabled,
            traits: InputFieldTraits::default(),
            limitation: None,
            criterion: None,
            catalog: MessageCatalog::new(),
            is_enabled: true,
            is_editing: false,
            is_masked: false,
            has_next_responder: false,
            events: Vec::new(),
        };
        field.setup(model)?;
        Ok(field)
    }

    /// Re-apply a model. State and attached criterion are kept.
    ///
    /// On error the field is left unchanged.
    pub fn setup(&mut self, model: FieldModel) -> Result<(), FieldError> {
        let limitation = model.traits.text_limitation_criterion()?;

        self.is_masked = model.traits.is_secure_text_entry;
        self.limitation = limitation;
        self.traits = model.traits;
        self.title = model.title;
        self.placeholder = model.placeholder;
        if model.hint.is_some() {
            self.hint = model.hint;
        }
        self.text = model.text.unwrap_or_default();
        Ok(())
    }

    /// Validate with `criterion` when editing ends.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = Some(criterion);
        self
    }

    /// Resolve failure messages through `catalog`.
    #[must_use]
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Link (or unlink) a next responder that receives focus on return.
    pub fn set_next_responder(&mut self, linked: bool) {
        self.has_next_responder = linked;
    }

    pub fn set_criterion(&mut self, criterion: Option<Criterion>) {
        self.criterion = criterion;
    }

    pub fn set_hint(&mut self, hint: Option<String>) {
        self.hint = hint;
    }

    // -- Accessors --

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Text for the hint line, accounting for failure messages.
    #[must_use]
    pub fn displayed_hint(&self) -> Option<&str> {
        self.state.displayed_hint(self.hint.as_deref())
    }

    #[must_use]
    pub fn traits(&self) -> &InputFieldTraits {
        &self.traits
    }

    #[must_use]
    pub fn criterion(&self) -> Option<&Criterion> {
        self.criterion.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Whether the field currently holds focus.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Whether secure text is currently hidden. Always `false` for plain
    /// entry.
    #[must_use]
    pub fn is_masked(&self) -> bool {
        self.traits.is_secure_text_entry && self.is_masked
    }

    /// Whether the host should show the reveal toggle.
    #[must_use]
    pub fn shows_secure_toggle(&self) -> bool {
        self.traits.is_secure_text_entry
    }

    #[must_use]
    pub fn clear_button_mode(&self) -> ClearButtonMode {
        self.traits.effective_clear_button_mode()
    }

    /// Events queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last [`take_events`](Self::take_events).
    #[must_use]
    pub fn pending_events(&self) -> &[FieldEvent] {
        &self.events
    }

    // -- Editing lifecycle --

    /// Take focus. Returns `false` when the field is disabled.
    pub fn begin_editing(&mut self) -> bool {
        if !self.is_enabled {
            return false;
        }
        self.is_editing = true;
        if self.state == FieldState::Enabled {
            self.set_state(FieldState::Selected);
        }
        true
    }

    /// Ask the field to take focus, forwarding it when disabled.
    pub fn request_focus(&mut self) -> FocusOutcome {
        if self.begin_editing() {
            return FocusOutcome::Focused;
        }
        if self.has_next_responder {
            self.events.push(FieldEvent::FocusNext);
            FocusOutcome::ForwardedToNext
        } else {
            FocusOutcome::Refused
        }
    }

    /// User edit. Returns `false` if the edit was rejected.
    ///
    /// Edits are rejected while disabled and when the new text does not
    /// fully match the traits' text limitation.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !self.is_enabled {
            return false;
        }
        if let Some(limitation) = &self.limitation
            && !limitation.validate(text.as_str())
        {
            tracing::trace!(len = text.len(), "edit rejected by text limitation");
            return false;
        }
        if self.state.is_failed() {
            self.set_state(FieldState::Selected);
        }
        self.text.clone_from(&text);
        self.events.push(FieldEvent::EditingChanged(text));
        true
    }

    /// Programmatic replacement that is published like an edit.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.events.push(FieldEvent::EditingChanged(self.text.clone()));
    }

    /// Sync text from a data source without publishing it.
    ///
    /// Ignored while the user is editing so their input is not overwritten.
    pub fn update_text(&mut self, text: impl Into<String>) -> bool {
        if self.state == FieldState::Selected {
            return false;
        }
        self.text = text.into();
        true
    }

    /// Drop focus: re-mask, trim, validate, and publish the resign.
    pub fn end_editing(&mut self) {
        if !self.is_editing {
            return;
        }
        self.is_editing = false;
        self.set_state(if self.is_enabled {
            FieldState::Enabled
        } else {
            FieldState::Disabled
        });

        if self.traits.is_secure_text_entry && !self.is_masked {
            self.is_masked = true;
            self.events
                .push(FieldEvent::SecureEntryChanged { masked: true });
        }
        if self.traits.trims_whitespace() {
            let trimmed = self.text.trim();
            if trimmed.len() != self.text.len() {
                self.text = trimmed.to_string();
            }
        }

        self.events.push(FieldEvent::WillResign(self.text.clone()));
        if self.criterion.is_some() {
            self.validate();
        }
        self.events.push(FieldEvent::DidResign(self.text.clone()));
    }

    /// Return key: hand focus on, end editing, publish the return.
    pub fn return_key(&mut self) {
        self.events.push(if self.has_next_responder {
            FieldEvent::FocusNext
        } else {
            FieldEvent::Resign
        });
        self.end_editing();
        self.events.push(FieldEvent::Return(self.text.clone()));
        self.haptic(Haptic::Selection);
    }

    /// Reveal or hide secure text. Returns `false` for plain entry.
    pub fn toggle_secure_visibility(&mut self) -> bool {
        if !self.traits.is_secure_text_entry {
            return false;
        }
        self.begin_editing();
        self.is_masked = !self.is_masked;
        self.events.push(FieldEvent::SecureEntryChanged {
            masked: self.is_masked,
        });
        true
    }

    // -- State --

    /// Enable or disable the field. Disabling drops focus without resigning.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
        if !enabled {
            self.is_editing = false;
        }
        self.set_state(if enabled {
            FieldState::Enabled
        } else {
            FieldState::Disabled
        });
    }

    /// Show a failure and queue error feedback.
    pub fn fail(&mut self, message: Option<String>) {
        self.fail_silently(message);
        self.haptic(Haptic::Error);
    }

    /// Show a failure without feedback.
    pub fn fail_silently(&mut self, message: Option<String>) {
        self.set_state(FieldState::Failed(message));
    }

    /// Leave the failed state for whichever state the field is really in.
    pub fn unfail(&mut self) {
        let state = if self.is_editing {
            FieldState::Selected
        } else if self.is_enabled {
            FieldState::Enabled
        } else {
            FieldState::Disabled
        };
        self.set_state(state);
    }

    // -- Validation --

    /// Check the text against the attached criterion.
    ///
    /// Fails the field with the resolved message on failure, and clears a
    /// previous failure on success. Without a criterion the text is valid.
    pub fn validate(&mut self) -> bool {
        match self.criterion.clone() {
            Some(criterion) => self.validate_with(&criterion, &()),
            None => true,
        }
    }

    /// Check the text against a criterion bound to the owning context `ctx`.
    pub fn validate_with<C: 'static>(&mut self, criterion: &Criterion<C>, ctx: &C) -> bool {
        let result = criterion.check_in(ctx, self.text.as_str());
        match result.message_in(ctx, &self.catalog) {
            Some(message) => {
                tracing::debug!(code = criterion.error().code(), "field failed validation");
                self.fail(Some(message));
                false
            }
            None => {
                if self.state.is_failed() {
                    self.unfail();
                }
                true
            }
        }
    }

    fn haptic(&mut self, haptic: Haptic) {
        if self.traits.is_haptics_allowed {
            self.events.push(FieldEvent::Haptic(haptic));
        }
    }

    fn set_state(&mut self, state: FieldState) {
        if self.state != state {
            tracing::debug!(from = self.state.name(), to = state.name(), "field state changed");
        }
        self.state = state;
    }
}
