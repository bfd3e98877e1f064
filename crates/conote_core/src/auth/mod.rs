//! Identity bookkeeping for the auth collaborator boundary.
//!
//! # Responsibility
//! - Persist the current identity in its durable slot.
//! - Reuse an existing membership's user id when an email logs in again.

mod identity_store;

pub use identity_store::{AuthError, AuthResult, IdentityStore};
