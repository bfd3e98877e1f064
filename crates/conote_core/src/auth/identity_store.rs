//! Current-identity slot store.
//!
//! # Responsibility
//! - Own the `"identity"` durable slot: login persists, logout removes.
//! - Keep user ids stable across logins by reusing the id of an existing
//!   note member with the same email.
//!
//! # Invariants
//! - The core never issues or validates credentials; an email is enough
//!   to log in.
//! - A malformed identity payload reads back as no identity, never as an
//!   error.

use crate::model::identity::{is_valid_email, Identity};
use crate::model::note::Note;
use crate::store::{SlotError, SlotStore, IDENTITY_SLOT};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type AuthResult<T> = Result<T, AuthError>;

/// Failure of an identity slot operation.
#[derive(Debug)]
pub enum AuthError {
    /// Email fails the minimal shape check.
    InvalidEmail(String),
    Slot(SlotError),
    Serialize(serde_json::Error),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid login email: `{value}`"),
            Self::Slot(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize identity: {err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEmail(_) => None,
            Self::Slot(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<SlotError> for AuthError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

/// Bookkeeper for the current identity of one application instance.
pub struct IdentityStore<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> IdentityStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    /// Reads the persisted identity; missing or malformed payloads read
    /// back as `None`.
    pub fn current(&self) -> AuthResult<Option<Identity>> {
        let Some(payload) = self.slots.get(IDENTITY_SLOT)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Identity>(&payload) {
            Ok(identity) => Ok(Some(identity)),
            Err(err) => {
                warn!("event=identity_load module=auth status=recovered error={err}");
                Ok(None)
            }
        }
    }

    /// Logs `email` in and persists the resulting identity.
    ///
    /// If any note in `notes` already carries a member with this email,
    /// that member's user id is reused so role lookups keep matching by
    /// id; otherwise a fresh id is minted.
    pub fn login(&mut self, email: &str, notes: &[Note]) -> AuthResult<Identity> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }

        let existing_id = notes.iter().find_map(|note| {
            note.members
                .iter()
                .find(|member| member.email == email)
                .map(|member| member.user_id.clone())
        });
        let identity = Identity::new(
            existing_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            email,
        );

        let payload = serde_json::to_string(&identity).map_err(AuthError::Serialize)?;
        self.slots.put(IDENTITY_SLOT, &payload)?;
        info!("event=identity_login module=auth status=ok user_id={}", identity.id);
        Ok(identity)
    }

    /// Clears the persisted identity; logging out twice is a no-op.
    pub fn logout(&mut self) -> AuthResult<()> {
        self.slots.remove(IDENTITY_SLOT)?;
        info!("event=identity_logout module=auth status=ok");
        Ok(())
    }
}
