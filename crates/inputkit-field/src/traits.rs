#![forbid(unsafe_code)]

//! Keyboard and entry traits for an input field.
//!
//! These are plain configuration values. The host maps them onto its own
//! text-entry widget; the field model only reads the few rules that change
//! behavior (secure entry, whitespace trimming, text limitation, haptics).

use inputkit_validation::{Criterion, PatternError};
use serde::{Deserialize, Serialize};

use crate::field::FieldError;

/// Semantic meaning of the expected text, used for autofill hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContentType {
    /// Full personal name.
    Name,
    /// Account identifier.
    Username,
    /// Existing password.
    Password,
    /// Password being created; hosts may offer a generated one.
    NewPassword,
    /// Code delivered by SMS or email.
    OneTimeCode,
    EmailAddress,
    TelephoneNumber,
    PostalCode,
    StreetAddress,
    Url,
}

impl TextContentType {
    /// Returns `true` for password content, which is never trimmed.
    #[must_use]
    pub fn is_password(self) -> bool {
        matches!(self, Self::Password | Self::NewPassword)
    }
}

/// Which letters the host keyboard capitalizes automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Autocapitalization {
    #[default]
    None,
    /// First letter of each word.
    Words,
    /// First letter of each sentence.
    Sentences,
    AllCharacters,
}

/// Whether the host keyboard corrects spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Autocorrection {
    /// Leave it to the platform.
    #[default]
    Default,
    No,
    Yes,
}

/// Keyboard layout requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardType {
    #[default]
    Default,
    AsciiCapable,
    NumbersAndPunctuation,
    Url,
    NumberPad,
    PhonePad,
    NamePhonePad,
    EmailAddress,
    DecimalPad,
    AsciiCapableNumberPad,
    WebSearch,
}

impl KeyboardType {
    /// Numeric pads have no return key of their own.
    #[must_use]
    pub fn is_numeric_pad(self) -> bool {
        matches!(
            self,
            Self::PhonePad
                | Self::DecimalPad
                | Self::AsciiCapableNumberPad
                | Self::NamePhonePad
                | Self::NumberPad
        )
    }
}

/// Label of the keyboard's return key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKey {
    #[default]
    Default,
    Go,
    Next,
    Done,
    Search,
    Send,
    Join,
    Continue,
}

/// When the inline clear button is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearButtonMode {
    Never,
    #[default]
    WhileEditing,
    UnlessEditing,
    Always,
}

// ---------------------------------------------------------------------------
// InputFieldTraits
// ---------------------------------------------------------------------------

/// Entry configuration for an [`InputField`](crate::InputField).
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```rust
/// use inputkit_field::{InputFieldTraits, KeyboardType};
///
/// let traits = InputFieldTraits::from_json_str(
///     r#"{ "keyboard": "number_pad", "text_limitation": "[0-9]{0,5}" }"#,
/// ).unwrap();
/// assert_eq!(traits.keyboard, KeyboardType::NumberPad);
/// assert!(traits.needs_accessory_toolbar());
/// assert!(traits.is_haptics_allowed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFieldTraits {
    pub text_content_type: Option<TextContentType>,
    pub autocapitalization: Autocapitalization,
    pub autocorrection: Autocorrection,
    pub keyboard: KeyboardType,
    pub return_key: ReturnKey,
    /// Title of the accessory "done" button shown above numeric pads.
    pub numpad_return_key_title: Option<String>,
    /// Ignored for secure entry, which never shows a clear button.
    pub clear_button_mode: ClearButtonMode,
    pub is_secure_text_entry: bool,
    pub is_haptics_allowed: bool,
    /// Pattern every edited text must fully match.
    pub text_limitation: Option<String>,
}

impl Default for InputFieldTraits {
    fn default() -> Self {
        Self {
            text_content_type: None,
            autocapitalization: Autocapitalization::None,
            autocorrection: Autocorrection::Default,
            keyboard: KeyboardType::Default,
            return_key: ReturnKey::Default,
            numpad_return_key_title: None,
            clear_button_mode: ClearButtonMode::WhileEditing,
            is_secure_text_entry: false,
            is_haptics_allowed: true,
            text_limitation: None,
        }
    }
}

impl InputFieldTraits {
    /// Parse traits from a JSON object. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: TextContentType) -> Self {
        self.text_content_type = Some(content_type);
        self
    }

    #[must_use]
    pub fn with_keyboard(mut self, keyboard: KeyboardType) -> Self {
        self.keyboard = keyboard;
        self
    }

    #[must_use]
    pub fn with_return_key(mut self, return_key: ReturnKey) -> Self {
        self.return_key = return_key;
        self
    }

    #[must_use]
    pub fn with_numpad_return_key_title(mut self, title: impl Into<String>) -> Self {
        self.numpad_return_key_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_clear_button_mode(mut self, mode: ClearButtonMode) -> Self {
        self.clear_button_mode = mode;
        self
    }

    #[must_use]
    pub fn secure(mut self) -> Self {
        self.is_secure_text_entry = true;
        self
    }

    #[must_use]
    pub fn without_haptics(mut self) -> Self {
        self.is_haptics_allowed = false;
        self
    }

    #[must_use]
    pub fn with_text_limitation(mut self, pattern: impl Into<String>) -> Self {
        self.text_limitation = Some(pattern.into());
        self
    }

    /// Clear button mode after applying the secure-entry override.
    #[must_use]
    pub fn effective_clear_button_mode(&self) -> ClearButtonMode {
        if self.is_secure_text_entry {
            ClearButtonMode::Never
        } else {
            self.clear_button_mode
        }
    }

    /// Numeric pads get an accessory toolbar carrying the return action.
    #[must_use]
    pub fn needs_accessory_toolbar(&self) -> bool {
        self.keyboard.is_numeric_pad()
    }

    /// Whether surrounding whitespace is stripped when editing ends.
    #[must_use]
    pub fn trims_whitespace(&self) -> bool {
        !self.is_secure_text_entry
            && !self
                .text_content_type
                .is_some_and(TextContentType::is_password)
    }

    /// Compile [`text_limitation`](Self::text_limitation) into a criterion.
    pub fn text_limitation_criterion(&self) -> Result<Option<Criterion>, PatternError> {
        self.text_limitation
            .as_deref()
            .map(Criterion::regex)
            .transpose()
    }
}
