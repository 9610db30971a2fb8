//! Property-based invariant tests for the input field state machine.
//!
//! Random operation sequences are replayed against a field and checked after
//! every step:
//!
//! 1. `update_text` never changes the text of a `Selected` field.
//! 2. Without a hint the displayed hint is always empty.
//! 3. `Failed` is only left through editing, ending the edit, `unfail`,
//!    `set_enabled`, or a validation that passes.
//! 4. A disabled field never starts editing.
//! 5. No haptic is queued when haptics are off.

use inputkit_field::{FieldEvent, FieldModel, FieldState, InputField, InputFieldTraits};
use inputkit_validation::Criterion;
use proptest::prelude::*;

// ── Operations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Begin,
    Edit(String),
    SetText(String),
    Update(String),
    End,
    Return,
    Toggle,
    Enable(bool),
    Fail(Option<String>),
    FailSilently(Option<String>),
    Unfail,
    Validate,
    Focus,
}

impl Op {
    /// Whether this operation may move a field out of `Failed`.
    fn may_leave_failure(&self) -> bool {
        matches!(
            self,
            Self::Edit(_)
                | Self::End
                | Self::Return
                | Self::Enable(_)
                | Self::Unfail
                | Self::Validate
        )
    }
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[ a-z0-9@.]{0,12}", "[0-9]{5}", Just(String::new())]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Begin),
        text_strategy().prop_map(Op::Edit),
        text_strategy().prop_map(Op::SetText),
        text_strategy().prop_map(Op::Update),
        Just(Op::End),
        Just(Op::Return),
        Just(Op::Toggle),
        any::<bool>().prop_map(Op::Enable),
        proptest::option::of("[a-z]{1,6}").prop_map(Op::Fail),
        proptest::option::of("[a-z]{1,6}").prop_map(Op::FailSilently),
        Just(Op::Unfail),
        Just(Op::Validate),
        Just(Op::Focus),
    ]
}

fn traits_strategy() -> impl Strategy<Value = InputFieldTraits> {
    (any::<bool>(), any::<bool>()).prop_map(|(secure, haptics)| {
        let mut traits = InputFieldTraits::default();
        traits.is_secure_text_entry = secure;
        traits.is_haptics_allowed = haptics;
        traits
    })
}

fn apply(field: &mut InputField, op: &Op) {
    match op {
        Op::Begin => {
            field.begin_editing();
        }
        Op::Edit(text) => {
            field.edit(text.as_str());
        }
        Op::SetText(text) => field.set_text(text.as_str()),
        Op::Update(text) => {
            field.update_text(text.as_str());
        }
        Op::End => field.end_editing(),
        Op::Return => field.return_key(),
        Op::Toggle => {
            field.toggle_secure_visibility();
        }
        Op::Enable(enabled) => field.set_enabled(*enabled),
        Op::Fail(message) => field.fail(message.clone()),
        Op::FailSilently(message) => field.fail_silently(message.clone()),
        Op::Unfail => field.unfail(),
        Op::Validate => {
            field.validate();
        }
        Op::Focus => {
            field.request_focus();
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn update_text_never_overwrites_selected(
        ops in proptest::collection::vec(op_strategy(), 0..24),
        incoming in text_strategy(),
    ) {
        let mut field = InputField::new(FieldModel::new()).unwrap();
        for op in &ops {
            apply(&mut field, op);
        }
        let before = field.text().to_string();
        let was_selected = field.state() == &FieldState::Selected;
        let accepted = field.update_text(incoming.as_str());

        prop_assert_eq!(accepted, !was_selected);
        if was_selected {
            prop_assert_eq!(field.text(), before.as_str());
        } else {
            prop_assert_eq!(field.text(), incoming.as_str());
        }
    }

    #[test]
    fn no_hint_means_no_displayed_hint(
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let mut field = InputField::new(FieldModel::new())
            .unwrap()
            .with_criterion(Criterion::zip_code());
        for op in &ops {
            apply(&mut field, op);
            prop_assert_eq!(field.displayed_hint(), None);
        }
    }

    #[test]
    fn failure_is_only_left_through_allowed_operations(
        ops in proptest::collection::vec(op_strategy(), 0..32),
    ) {
        let mut field = InputField::new(FieldModel::new().with_hint("hint"))
            .unwrap()
            .with_criterion(Criterion::non_empty());
        for op in &ops {
            let was_failed = field.state().is_failed();
            apply(&mut field, op);
            if was_failed && !field.state().is_failed() {
                prop_assert!(op.may_leave_failure(), "{op:?} cleared a failure");
            }
        }
    }

    #[test]
    fn disabled_field_never_edits(
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let mut field = InputField::new(FieldModel::new()).unwrap();
        for op in &ops {
            let disabled = field.state().is_disabled();
            let editing = field.is_editing();
            apply(&mut field, op);
            if disabled && matches!(op, Op::Begin | Op::Focus) {
                prop_assert_eq!(field.is_editing(), editing);
                prop_assert!(field.state().is_disabled());
            }
        }
    }

    #[test]
    fn haptics_respect_traits(
        traits in traits_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let allowed = traits.is_haptics_allowed;
        let mut field = InputField::new(FieldModel::new().with_traits(traits))
            .unwrap()
            .with_criterion(Criterion::email());
        for op in &ops {
            apply(&mut field, op);
        }
        let haptics = field
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, FieldEvent::Haptic(_)))
            .count();
        if !allowed {
            prop_assert_eq!(haptics, 0);
        }
    }
}
