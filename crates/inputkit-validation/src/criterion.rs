#![forbid(unsafe_code)]

//! The [`Criterion`] value type: a predicate paired with a failure descriptor.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Hir, Look};

use crate::error::{ValidationError, ValidationResult};

type Predicate<C> = dyn Fn(&C, Option<&str>) -> bool + Send + Sync;

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// An immutable validation rule over an optional string input.
///
/// A criterion pairs a pure predicate with the [`ValidationError`] reported
/// when that predicate fails. Combinators such as [`fail_with`](Self::fail_with)
/// and [`accept_empty`](Self::accept_empty) return new criteria and leave the
/// receiver untouched. Cloning is cheap: the predicate is reference counted.
///
/// `C` is the owning context handed to [`validate_in`](Self::validate_in).
/// Rules that read external state (see [`external`](Self::external)) get it
/// from `C` at validation time rather than capturing it at construction.
/// Context-free rules use the default `C = ()` and can call
/// [`validate`](Criterion::validate) directly.
///
/// # Example
///
/// ```rust
/// use inputkit_validation::{Criterion, ValidationError};
///
/// let zip: Criterion = Criterion::accept_empty(Criterion::zip_code());
/// assert!(zip.validate(None));
/// assert!(zip.validate("12345"));
/// assert!(!zip.validate("1234"));
///
/// let strict = zip.fail_with(ValidationError::message("Use five digits"));
/// assert_eq!(zip.error(), &ValidationError::Invalid);
/// assert!(strict.error().is_external());
/// ```
pub struct Criterion<C = ()> {
    predicate: Arc<Predicate<C>>,
    error: ValidationError<C>,
}

impl<C: 'static> Criterion<C> {
    /// Build a criterion from a context-free predicate. Fails with
    /// [`ValidationError::Invalid`].
    #[must_use]
    pub fn new(predicate: impl Fn(Option<&str>) -> bool + Send + Sync + 'static) -> Self {
        Self::with_context(move |_, input| predicate(input))
    }

    /// Build a criterion whose predicate also reads the owning context.
    #[must_use]
    pub fn with_context(
        predicate: impl Fn(&C, Option<&str>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            error: ValidationError::default(),
        }
    }

    /// Build a criterion that accepts input fully matching `pattern`.
    ///
    /// The pattern is anchored at both ends. A missing input is matched as
    /// the empty string, so it fails unless the pattern accepts `""`.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Self::compiled(pattern, false)
    }

    /// Like [`regex`](Self::regex), ignoring letter case.
    pub fn regex_case_insensitive(pattern: &str) -> Result<Self, PatternError> {
        Self::compiled(pattern, true)
    }

    fn compiled(pattern: &str, case_insensitive: bool) -> Result<Self, PatternError> {
        let regex = anchored(pattern, case_insensitive)?;
        Ok(Self::new(move |input| regex.is_match(input.unwrap_or_default())))
    }

    /// Same predicate, different failure descriptor.
    #[must_use]
    pub fn fail_with(&self, error: ValidationError<C>) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            error,
        }
    }

    /// The descriptor reported when this criterion fails.
    #[must_use]
    pub fn error(&self) -> &ValidationError<C> {
        &self.error
    }

    /// Apply the predicate to `input` within `ctx`.
    pub fn validate_in<'a>(&self, ctx: &C, input: impl Into<Option<&'a str>>) -> bool {
        (self.predicate)(ctx, input.into())
    }

    /// Apply the predicate and attach the descriptor on failure.
    pub fn check_in<'a>(&self, ctx: &C, input: impl Into<Option<&'a str>>) -> ValidationResult<C> {
        let valid = self.validate_in(ctx, input);
        tracing::trace!(code = self.error.code(), valid, "criterion evaluated");
        if valid {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.error.clone())
        }
    }
}

impl Criterion<()> {
    /// Apply the predicate to `input`.
    pub fn validate<'a>(&self, input: impl Into<Option<&'a str>>) -> bool {
        self.validate_in(&(), input)
    }

    /// Apply the predicate and attach the descriptor on failure.
    pub fn check<'a>(&self, input: impl Into<Option<&'a str>>) -> ValidationResult {
        self.check_in(&(), input)
    }
}

impl<C> Clone for Criterion<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            error: self.error.clone(),
        }
    }
}

impl<C> fmt::Debug for Criterion<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Compile `pattern` so it only matches the whole input.
///
/// The pattern is parsed on its own and the anchors are added to the parsed
/// expression, so neither unbalanced groups nor a trailing `(?x)` comment can
/// reach past the pattern.
fn anchored(pattern: &str, case_insensitive: bool) -> Result<Regex, PatternError> {
    let reject = |source: regex::Error| {
        tracing::warn!(pattern, %source, "rejected validation pattern");
        PatternError {
            pattern: pattern.to_string(),
            source,
        }
    };

    let hir = ParserBuilder::new()
        .case_insensitive(case_insensitive)
        .build()
        .parse(pattern)
        .map_err(|err| reject(regex::Error::Syntax(err.to_string())))?;
    let whole = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
    Regex::new(&whole.to_string()).map_err(reject)
}

// ---------------------------------------------------------------------------
// PatternError
// ---------------------------------------------------------------------------

/// A regular expression that could not be compiled.
#[derive(Debug, Clone)]
pub struct PatternError {
    pattern: String,
    source: regex::Error,
}

impl PatternError {
    /// The pattern as given by the caller.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern {:?}: {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_invalid() {
        let c: Criterion = Criterion::new(|_| true);
        assert_eq!(c.error(), &ValidationError::Invalid);
    }

    #[test]
    fn validate_accepts_str_and_option() {
        let c: Criterion = Criterion::new(|input| input == Some("x"));
        assert!(c.validate("x"));
        assert!(c.validate(Some("x")));
        assert!(!c.validate(None));

        let owned = Some(String::from("x"));
        assert!(c.validate(owned.as_deref()));
    }

    #[test]
    fn fail_with_replaces_only_descriptor() {
        let base: Criterion = Criterion::new(|input| input.is_some());
        let replaced = base.fail_with(ValidationError::Required);

        assert_eq!(base.error(), &ValidationError::Invalid);
        assert_eq!(replaced.error(), &ValidationError::Required);
        for input in [None, Some(""), Some("abc")] {
            assert_eq!(base.validate(input), replaced.validate(input));
        }
    }

    #[test]
    fn check_carries_descriptor() {
        let c: Criterion = Criterion::new(|_| false).fail_with(ValidationError::Mismatch);
        assert_eq!(c.check("x"), ValidationResult::Invalid(ValidationError::Mismatch));

        let ok: Criterion = Criterion::new(|_| true);
        assert!(ok.check("x").is_valid());
    }

    #[test]
    fn context_predicate_reads_context() {
        struct Limits {
            max: usize,
        }
        let c = Criterion::<Limits>::with_context(|limits, input| {
            input.unwrap_or_default().len() <= limits.max
        });
        assert!(c.validate_in(&Limits { max: 3 }, "abc"));
        assert!(!c.validate_in(&Limits { max: 2 }, "abc"));
    }

    #[test]
    fn regex_is_anchored() {
        let c: Criterion = Criterion::regex("[a-z]+").unwrap();
        assert!(c.validate("abc"));
        assert!(!c.validate("abc1"));
        assert!(!c.validate("1abc"));
    }

    #[test]
    fn regex_alternation_matches_whole_input() {
        let c: Criterion = Criterion::regex("a|ab").unwrap();
        assert!(c.validate("ab"));
        assert!(c.validate("a"));
        assert!(!c.validate("abc"));
    }

    #[test]
    fn unbalanced_group_is_rejected() {
        let err = Criterion::<()>::regex("a)|(b").unwrap_err();
        assert_eq!(err.pattern(), "a)|(b");
        assert!(Criterion::<()>::regex("(a").is_err());
    }

    #[test]
    fn verbose_pattern_with_trailing_comment() {
        let c: Criterion = Criterion::regex("(?x) [0-9]+ # digits only").unwrap();
        assert!(c.validate("2024"));
        assert!(!c.validate("2024a"));
        assert!(!c.validate("a2024"));
    }

    #[test]
    fn inline_flags_stay_inside_pattern() {
        let c: Criterion = Criterion::regex("(?i)ab|cd").unwrap();
        assert!(c.validate("AB"));
        assert!(c.validate("Cd"));
        assert!(!c.validate("abcd"));
        assert!(!c.validate("xcd"));
    }

    #[test]
    fn regex_missing_input_is_empty_string() {
        let strict: Criterion = Criterion::regex("[0-9]+").unwrap();
        assert!(!strict.validate(None));

        let lenient: Criterion = Criterion::regex("[0-9]*").unwrap();
        assert!(lenient.validate(None));
        assert!(lenient.validate(""));
    }

    #[test]
    fn regex_case_insensitive() {
        let c: Criterion = Criterion::regex_case_insensitive("[a-z]{3}").unwrap();
        assert!(c.validate("AbC"));
        let sensitive: Criterion = Criterion::regex("[a-z]{3}").unwrap();
        assert!(!sensitive.validate("AbC"));
    }

    #[test]
    fn bad_regex_reports_pattern() {
        let err = Criterion::<()>::regex("(unclosed").unwrap_err();
        assert_eq!(err.pattern(), "(unclosed");
        assert!(err.to_string().contains("(unclosed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn criteria_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Criterion>();
        assert_send_sync::<ValidationError>();
    }

    #[test]
    fn concurrent_validation_agrees() {
        let c: Criterion = Criterion::non_empty();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = c.clone();
                std::thread::spawn(move || (c.validate("a"), c.validate("  ")))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), (true, false));
        }
    }

    #[test]
    fn debug_shows_descriptor() {
        let c: Criterion = Criterion::non_empty();
        assert!(format!("{c:?}").contains("Required"));
    }
}
