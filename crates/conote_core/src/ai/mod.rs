//! AI-rewording collaborator boundary.
//!
//! # Responsibility
//! - Hand plain text out to a reword engine and carry the candidate back
//!   as a proposal the user accepts or discards.

mod reword;

pub use reword::{propose_reword, RewordAction, RewordEngine, RewordError, RewordProposal};
