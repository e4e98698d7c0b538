//! Interaction resolver.
//!
//! Decides, for a block and its interactions, whether a client component
//! renders and how respondent input is validated. Bindings are declared in
//! a static table keyed by block-type sets; at most one binding applies to
//! any block type. Validators are pure functions of the input and the
//! active interaction's option bag.

use formflow_db::entities::{FormBlockType, form_block_interaction};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::options::InteractionOptions;

/// Message for the universal required-field precondition.
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";

/// Message when input exceeds the configured character limit.
pub const MAX_CHARS_EXCEEDED_MESSAGE: &str =
    "You have exceeded the maximum number of characters allowed.";

/// Outcome of validating respondent input.
///
/// An invalid outcome is the normal negative branch, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Whether the input passed.
    pub valid: bool,
    /// Human-readable failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Validation {
    /// A passing outcome.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing outcome with a message.
    #[must_use]
    pub fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

/// Client component mounted for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    /// Multi-line text entry.
    TextareaAction,
    /// Single-line text entry (short/email/link/number/phone).
    InputAction,
    /// Consent capture.
    ConsentAction,
    /// Multiple choice, many answers.
    CheckboxAction,
    /// Multiple choice, one answer.
    RadioAction,
}

/// Static component props, declared per binding.
///
/// A closed set of knobs, not a free-form map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    /// Whether the Enter key is captured instead of submitting.
    pub disable_enter_key: bool,
}

/// Type-specific rule, applied after the required-field precondition with
/// guaranteed non-empty input.
type ValidatorFn = fn(&str, &InteractionOptions) -> Validation;

struct InteractionBinding {
    applies_to: &'static [FormBlockType],
    component: Component,
    props: ComponentProps,
    rule: ValidatorFn,
}

fn accept_any(_input: &str, _options: &InteractionOptions) -> Validation {
    Validation::ok()
}

/// Character-limit rule for the textarea component.
///
/// `max_chars` absent or non-positive means no limit. Length is measured
/// in characters on the raw payload, not a trimmed form.
fn max_chars_rule(input: &str, options: &InteractionOptions) -> Validation {
    match options.integer("max_chars") {
        Some(limit) if limit > 0 => {
            if input.chars().count() as i64 <= limit {
                Validation::ok()
            } else {
                Validation::fail(MAX_CHARS_EXCEEDED_MESSAGE)
            }
        }
        _ => Validation::ok(),
    }
}

static BINDINGS: &[InteractionBinding] = &[
    InteractionBinding {
        applies_to: &[FormBlockType::InputLong],
        component: Component::TextareaAction,
        props: ComponentProps {
            disable_enter_key: true,
        },
        rule: max_chars_rule,
    },
    InteractionBinding {
        applies_to: &[
            FormBlockType::InputShort,
            FormBlockType::InputEmail,
            FormBlockType::InputLink,
            FormBlockType::InputNumber,
            FormBlockType::InputPhone,
        ],
        component: Component::InputAction,
        props: ComponentProps {
            disable_enter_key: false,
        },
        rule: accept_any,
    },
    InteractionBinding {
        applies_to: &[FormBlockType::Consent],
        component: Component::ConsentAction,
        props: ComponentProps {
            disable_enter_key: false,
        },
        rule: accept_any,
    },
    InteractionBinding {
        applies_to: &[FormBlockType::Checkbox],
        component: Component::CheckboxAction,
        props: ComponentProps {
            disable_enter_key: false,
        },
        rule: accept_any,
    },
    InteractionBinding {
        applies_to: &[FormBlockType::Radio],
        component: Component::RadioAction,
        props: ComponentProps {
            disable_enter_key: false,
        },
        rule: accept_any,
    },
];

/// Resolve a block to its component binding and a validator.
///
/// The first interaction attached to the block supplies the option bag,
/// matching the single-active-interaction design; blocks without a
/// matching binding validate trivially.
#[must_use]
pub fn resolve(
    block_type: FormBlockType,
    interactions: &[form_block_interaction::Model],
) -> Resolved {
    let binding = BINDINGS
        .iter()
        .find(|binding| binding.applies_to.contains(&block_type));

    let options = interactions
        .first()
        .map_or_else(InteractionOptions::new, |interaction| {
            InteractionOptions::from_json(&interaction.options)
        });

    Resolved { binding, options }
}

/// Resolution result for one block: component binding plus a pure
/// validator over respondent input.
pub struct Resolved {
    binding: Option<&'static InteractionBinding>,
    options: InteractionOptions,
}

impl Resolved {
    /// Whether a client component is in use for this block.
    #[must_use]
    pub const fn in_use(&self) -> bool {
        self.binding.is_some()
    }

    /// The component to mount, if any.
    #[must_use]
    pub fn component(&self) -> Option<Component> {
        self.binding.map(|b| b.component)
    }

    /// The static props for the component, if any.
    #[must_use]
    pub fn props(&self) -> Option<ComponentProps> {
        self.binding.map(|b| b.props)
    }

    /// Validate respondent input.
    ///
    /// Pure: depends only on the input and the resolved options, safe to
    /// call repeatedly and concurrently. Blocks without a binding are
    /// trivially valid; for bound blocks, absent or empty input fails the
    /// required-field precondition before any type-specific rule runs.
    #[must_use]
    pub fn validate(&self, input: Option<&str>) -> Validation {
        let Some(binding) = self.binding else {
            return Validation::ok();
        };

        match input {
            None => Validation::fail(REQUIRED_FIELD_MESSAGE),
            Some(value) if value.is_empty() => Validation::fail(REQUIRED_FIELD_MESSAGE),
            Some(value) => (binding.rule)(value, &self.options),
        }
    }

    /// Validate a raw JSON payload as recorded in a response row.
    #[must_use]
    pub fn validate_payload(&self, payload: &JsonValue) -> Validation {
        self.validate(payload_text(payload).as_deref())
    }
}

/// Textual view of a response payload for validation.
///
/// Strings validate as-is; null counts as absent; other scalars (consent
/// booleans, choice arrays) are serialized, which makes them non-empty.
#[must_use]
fn payload_text(payload: &JsonValue) -> Option<String> {
    match payload {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
