//! Core business logic for formflow.
//!
//! The interesting parts of the form builder live here:
//!
//! - [`blocks`]: the block type registry (actionability, accepted
//!   interaction types)
//! - [`options`]: the schema-less interaction option bag
//! - [`resolver`]: block -> component/validator resolution
//! - [`stats`]: read-side rollups over a form's block/response graph
//! - [`presentation`]: display-only derivations with fallback chains
//! - [`services`]: orchestration over the repositories

pub mod blocks;
pub mod options;
pub mod presentation;
pub mod resolver;
pub mod services;
pub mod stats;

pub use blocks::{BlockTypeDescriptor, block_type_tag, descriptor, parse_block_type};
pub use options::{InteractionOptions, OptionValue};
pub use resolver::{
    Component, ComponentProps, MAX_CHARS_EXCEEDED_MESSAGE, REQUIRED_FIELD_MESSAGE, Resolved,
    Validation, resolve,
};
pub use services::*;
pub use stats::FormStats;
