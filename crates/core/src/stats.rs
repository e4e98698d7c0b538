//! Read-side rollups over a form's block/response graph.
//!
//! Pure derivations over already-loaded rows; the service layer fetches
//! and these functions count. Every figure tolerates an empty form and
//! comes back as zero, never an error.

use std::collections::HashSet;

use formflow_db::entities::{form_block, form_session_response};
use serde::Serialize;

use crate::blocks::descriptor;

/// Rollup figures for one form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormStats {
    /// All blocks belonging to the form, regardless of type.
    pub blocks_count: u64,
    /// Blocks whose type is actionable (everything except `none`).
    pub action_blocks_count: u64,
    /// Response rows referencing the form's blocks. Row-level: a session
    /// answering two blocks contributes two.
    pub responses_count: u64,
    /// Distinct sessions that produced at least one response.
    pub total_sessions: u64,
}

/// Count all blocks.
#[must_use]
pub fn blocks_count(blocks: &[form_block::Model]) -> u64 {
    blocks.len() as u64
}

/// Count blocks whose type is actionable per the block type registry.
#[must_use]
pub fn action_blocks_count(blocks: &[form_block::Model]) -> u64 {
    blocks
        .iter()
        .filter(|block| descriptor(block.block_type).is_actionable)
        .count() as u64
}

/// Count response rows.
#[must_use]
pub fn responses_count(responses: &[form_session_response::Model]) -> u64 {
    responses.len() as u64
}

/// Count distinct sessions among the response rows.
///
/// A session with zero responses never appears here, so it does not count
/// as started.
#[must_use]
pub fn total_sessions(responses: &[form_session_response::Model]) -> u64 {
    let mut sessions = HashSet::new();
    for response in responses {
        sessions.insert(response.form_session_id.as_str());
    }
    sessions.len() as u64
}

/// Derive all rollup figures at once.
#[must_use]
pub fn aggregate(
    blocks: &[form_block::Model],
    responses: &[form_session_response::Model],
) -> FormStats {
    FormStats {
        blocks_count: blocks_count(blocks),
        action_blocks_count: action_blocks_count(blocks),
        responses_count: responses_count(responses),
        total_sessions: total_sessions(responses),
    }
}
