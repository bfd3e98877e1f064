//! Conflict-resolution policies.
//!
//! # Responsibility
//! - Transform a stale working copy given the current stored note.
//!
//! # Invariants
//! - Policies are pure: they touch only the working copy and persist
//!   nothing.
//! - Merging is a structural append of block sequences, never an
//!   interleave or field-level diff.

use crate::model::note::Note;
use crate::session::edit_session::WorkingCopy;

/// Choice offered while an edit session is in conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Discard the working copy in favor of the stored state.
    AcceptIncoming,
    /// Keep the working copy; the next save overwrites the concurrent
    /// change (last editor wins at that point).
    AcceptCurrent,
    /// Combine both: `"<local> / <remote>"` title, local blocks followed
    /// by remote blocks.
    AcceptMerged,
}

impl ResolutionPolicy {
    /// Applies this policy to `working` given the stored note.
    pub fn apply(self, working: &mut WorkingCopy, stored: &Note) {
        match self {
            Self::AcceptIncoming => {
                working.title = stored.title.clone();
                working.content = stored.content.clone();
            }
            Self::AcceptCurrent => {}
            Self::AcceptMerged => {
                working.title = format!("{} / {}", working.title, stored.title);
                working.content.extend(stored.content.iter().cloned());
            }
        }
    }
}
