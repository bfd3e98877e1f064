//! Advisory permission resolution.
//!
//! # Responsibility
//! - Map (note, identity) to a role through one ordered lookup.
//! - Answer the edit/delete affordance questions for UI gating.

mod permissions;

pub use permissions::{can_delete, can_edit, resolve_role};
