//! Conflict-aware note editing.
//!
//! # Responsibility
//! - Drive the per-edit state machine around a pinned base version.
//! - Offer the pure conflict-resolution policies.

mod conflict;
mod edit_session;

pub use conflict::ResolutionPolicy;
pub use edit_session::{EditSession, SaveOutcome, SessionError, SessionState, WorkingCopy};
