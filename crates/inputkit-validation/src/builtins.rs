#![forbid(unsafe_code)]

//! Built-in criteria and combinators.

use std::fmt::Display;
use std::sync::{Arc, OnceLock};

use regex::{Regex, RegexBuilder};

use crate::criterion::Criterion;
use crate::error::{EXTERNAL_FALLBACK_MESSAGE, ValidationError};

/// Shape of an address; the length limits are checked separately in
/// [`is_email`] because the engine has no look-around.
const EMAIL_SHAPE: &str = concat!(
    r"\A[a-z0-9!#$%&'*+/=?^_{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_{|}~-]+)*",
    r"@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\z",
);

const EMAIL_MIN_LEN: usize = 6;
const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_LABEL_MAX_LEN: usize = 63;

const ZIP_CODE_LEN: usize = 5;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| {
            RegexBuilder::new(EMAIL_SHAPE)
                .case_insensitive(true)
                .unicode(false)
                .build()
                .map_err(|err| tracing::warn!(%err, "email pattern failed to compile"))
                .ok()
        })
        .as_ref()
}

/// Returns `true` if `input` is an address accepted by [`Criterion::email`].
pub fn is_email(input: &str) -> bool {
    if !email_regex().is_some_and(|re| re.is_match(input)) {
        return false;
    }
    // The shape only admits ASCII, so byte lengths are character counts.
    if !(EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&input.len()) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    local.len() <= EMAIL_LOCAL_MAX_LEN
        && domain
            .split('.')
            .all(|label| label.len() <= EMAIL_LABEL_MAX_LEN)
}

/// Returns `true` if `input` is exactly five ASCII digits.
pub fn is_zip_code(input: &str) -> bool {
    input.len() == ZIP_CODE_LEN && input.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `input` has content once surrounding whitespace and
/// newlines are trimmed. A missing input counts as empty.
pub fn is_non_empty(input: Option<&str>) -> bool {
    !input.unwrap_or_default().trim().is_empty()
}

impl<C: 'static> Criterion<C> {
    /// Accepts everything.
    #[must_use]
    pub fn always_valid() -> Self {
        Self::new(|_| true)
    }

    /// Rejects everything with [`ValidationError::Invalid`].
    #[must_use]
    pub fn always_error() -> Self {
        Self::new(|_| false).fail_with(ValidationError::Invalid)
    }

    /// Accepts input with content after trimming whitespace. Fails with
    /// [`ValidationError::Required`].
    #[must_use]
    pub fn non_empty() -> Self {
        Self::new(is_non_empty).fail_with(ValidationError::Required)
    }

    /// Accepts input exactly equal to `other`, without trimming. A missing
    /// input equals a missing `other`. Fails with [`ValidationError::Mismatch`].
    #[must_use]
    pub fn matches<'a>(other: impl Into<Option<&'a str>>) -> Self {
        let other = other.into().map(str::to_owned);
        Self::new(move |input| input == other.as_deref()).fail_with(ValidationError::Mismatch)
    }

    /// Like [`matches`](Self::matches), but reads the expected value from the
    /// owning context on every validation.
    #[must_use]
    pub fn matches_in(expected: impl Fn(&C) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::with_context(move |ctx, input| input == expected(ctx).as_deref())
            .fail_with(ValidationError::Mismatch)
    }

    /// Accepts empty input outright and hands anything else to `criterion`.
    ///
    /// Empty means failing [`non_empty`](Self::non_empty). The failure
    /// descriptor is inherited from `criterion`.
    #[must_use]
    pub fn accept_empty(criterion: Self) -> Self {
        let error = criterion.error().clone();
        Self::with_context(move |ctx, input| {
            !is_non_empty(input) || criterion.validate_in(ctx, input)
        })
        .fail_with(error)
    }

    /// Accepts input while `error` reports nothing.
    ///
    /// The supplier runs synchronously on each validation, against the
    /// context passed by the caller. The failure descriptor is
    /// [`ValidationError::External`], which runs the supplier again when the
    /// message is resolved and yields a single space if it has nothing to say.
    #[must_use]
    pub fn external<E, F>(error: F) -> Self
    where
        E: Display,
        F: Fn(&C) -> Option<E> + Send + Sync + 'static,
    {
        let supplier = Arc::new(error);
        let message = Arc::clone(&supplier);
        Self::with_context(move |ctx, _| supplier(ctx).is_none()).fail_with(
            ValidationError::external(move |ctx| {
                message(ctx).map_or_else(|| EXTERNAL_FALLBACK_MESSAGE.to_string(), |e| e.to_string())
            }),
        )
    }

    /// Accepts addresses shaped like RFC 5322, case-insensitively.
    ///
    /// The local part is at most 64 characters, every domain label at most
    /// 63, and the domain must end in a dotted top-level label. The whole
    /// address is 6 to 254 characters.
    ///
    /// Case folding is ASCII-only: look-alikes such as U+212A KELVIN SIGN or
    /// U+017F LATIN SMALL LETTER LONG S are rejected, not folded to `k`/`s`.
    #[must_use]
    pub fn email() -> Self {
        Self::new(|input| is_email(input.unwrap_or_default()))
    }

    /// Accepts exactly five ASCII digits.
    #[must_use]
    pub fn zip_code() -> Self {
        Self::new(|input| is_zip_code(input.unwrap_or_default()))
    }
}
