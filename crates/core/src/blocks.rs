//! Block type registry.
//!
//! Maps every block type to an immutable behavior descriptor: whether the
//! block counts as actionable, and which interaction types may attach to
//! it. The registry is process-wide, read-only configuration; adding a
//! block type means adding a variant and one descriptor entry.

use formflow_common::{AppError, AppResult};
use formflow_db::entities::{FormBlockType, InteractionType};
use sea_orm::ActiveEnum;

/// Behavior descriptor for one block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTypeDescriptor {
    /// Whether blocks of this type are expected to produce a response.
    pub is_actionable: bool,
    /// Interaction types that may attach to blocks of this type.
    pub accepts: &'static [InteractionType],
}

impl BlockTypeDescriptor {
    /// Whether an interaction of the given type may attach to this block
    /// type.
    #[must_use]
    pub fn accepts_interaction(&self, interaction_type: InteractionType) -> bool {
        self.accepts.contains(&interaction_type)
    }
}

// Message blocks produce no response but still carry a continue button.
const NONE: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: false,
    accepts: &[InteractionType::Button],
};

const CONSENT: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: true,
    accepts: &[InteractionType::Consent],
};

const CHECKBOX: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: true,
    accepts: &[InteractionType::Checkbox],
};

const RADIO: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: true,
    accepts: &[InteractionType::Radio],
};

const INPUT_LONG: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: true,
    accepts: &[InteractionType::Textarea],
};

const INPUT: BlockTypeDescriptor = BlockTypeDescriptor {
    is_actionable: true,
    accepts: &[InteractionType::Input],
};

/// Look up the descriptor for a block type.
///
/// Total over the closed enum; unknown tags are rejected earlier, at
/// [`parse_block_type`].
#[must_use]
pub const fn descriptor(block_type: FormBlockType) -> &'static BlockTypeDescriptor {
    match block_type {
        FormBlockType::None => &NONE,
        FormBlockType::Consent => &CONSENT,
        FormBlockType::Checkbox => &CHECKBOX,
        FormBlockType::Radio => &RADIO,
        FormBlockType::InputLong => &INPUT_LONG,
        FormBlockType::InputShort
        | FormBlockType::InputEmail
        | FormBlockType::InputLink
        | FormBlockType::InputNumber
        | FormBlockType::InputPhone => &INPUT,
    }
}

/// Parse a block type tag.
///
/// Tags outside the closed enumeration fail with
/// [`AppError::UnknownBlockType`].
pub fn parse_block_type(tag: &str) -> AppResult<FormBlockType> {
    FormBlockType::try_from_value(&tag.to_string())
        .map_err(|_| AppError::UnknownBlockType(tag.to_string()))
}

/// The wire tag for a block type (e.g. `input-long`).
#[must_use]
pub fn block_type_tag(block_type: FormBlockType) -> String {
    block_type.to_value()
}
