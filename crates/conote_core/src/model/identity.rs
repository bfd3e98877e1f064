//! Identity supplied by the external auth collaborator.
//!
//! # Responsibility
//! - Define the `{id, email}` shape the core receives at login.
//! - Own the email shape check shared by login and member management.
//!
//! # Invariants
//! - An identity is immutable for the lifetime of a session.
//! - The core never issues, validates or stores credentials.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Current user as handed over by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque stable user id. Minted as a UUID when the core has to
    /// generate one, but treated as an arbitrary string otherwise.
    pub id: String,
    /// Login email, used as the fallback membership key.
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Returns whether `value` has the minimal `local@host.tld` shape.
///
/// This mirrors the member-invite check of the original edit flow; it is
/// a gate against obvious typos, not an RFC validator.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}
