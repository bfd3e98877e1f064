//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record, its membership roster and its
//!   append-only version history.
//! - Provide roster-edit helpers used by explicit member-update flows.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `version` starts at 1 and `version_history.len() == version` after
//!   every successful store update.
//! - A note carries at least one member (its creator, `Owner`) from birth.

use crate::model::content::{default_content, ContentBlock};
use crate::model::identity::{is_valid_email, Identity};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every note in the collection.
pub type NoteId = Uuid;

/// Role a member holds on one note.
///
/// Roles gate UI affordances only; they are not a storage security
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Editor,
    Viewer,
}

/// Association of one identity with a role on one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMember {
    /// Opaque user id as supplied by the identity collaborator.
    pub user_id: String,
    /// Login email, used as the fallback membership key.
    pub email: String,
    pub role: MemberRole,
}

/// Immutable snapshot of a note state at one version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// 1-based version this snapshot belongs to.
    pub version: u32,
    pub title: String,
    pub content: Vec<ContentBlock>,
    /// Epoch milliseconds of the mutation that produced this version.
    pub updated_at: i64,
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Opaque ordered block sequence, never interpreted by the core.
    pub content: Vec<ContentBlock>,
    /// Epoch milliseconds of the last mutation.
    pub updated_at: i64,
    /// Current version, incremented by exactly 1 per successful update.
    pub version: u32,
    /// Append-only log of every (version, title, content) state so far.
    pub version_history: Vec<VersionEntry>,
    pub members: Vec<NoteMember>,
}

impl Note {
    /// Creates a version-1 note owned by `creator`.
    ///
    /// The single history entry equals the initial state, so the
    /// `version_history.len() == version` invariant holds from birth.
    pub fn new(title: impl Into<String>, creator: &Identity, now_ms: i64) -> Self {
        let title = title.into();
        let content = default_content();
        Self {
            id: Uuid::new_v4(),
            title: title.clone(),
            content: content.clone(),
            updated_at: now_ms,
            version: 1,
            version_history: vec![VersionEntry {
                version: 1,
                title,
                content,
                updated_at: now_ms,
            }],
            members: vec![NoteMember {
                user_id: creator.id.clone(),
                email: creator.email.clone(),
                role: MemberRole::Owner,
            }],
        }
    }
}

/// Update payload for one note.
///
/// Carries no version field by construction; the store alone numbers
/// versions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<Vec<ContentBlock>>,
    pub members: Option<Vec<NoteMember>>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn members(value: Vec<NoteMember>) -> Self {
        Self {
            members: Some(value),
            ..Self::default()
        }
    }
}

/// Roster-edit failure for explicit member-update flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// Email fails the minimal shape check.
    InvalidEmail(String),
    /// Email already appears in the roster.
    DuplicateEmail(String),
    /// No member carries the given user id.
    UnknownMember(String),
}

impl Display for MemberError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid member email: `{value}`"),
            Self::DuplicateEmail(value) => write!(f, "member already present: `{value}`"),
            Self::UnknownMember(user_id) => write!(f, "no member with user id `{user_id}`"),
        }
    }
}

impl Error for MemberError {}

/// Adds a member with a freshly minted user id.
///
/// Membership changes only travel through explicit member-update flows;
/// callers persist the edited roster via the store's patch path.
pub fn add_member(
    members: &mut Vec<NoteMember>,
    email: &str,
    role: MemberRole,
) -> Result<(), MemberError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(MemberError::InvalidEmail(email.to_string()));
    }
    if members.iter().any(|member| member.email == email) {
        return Err(MemberError::DuplicateEmail(email.to_string()));
    }
    members.push(NoteMember {
        user_id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        role,
    });
    Ok(())
}

/// Changes the role of the member identified by `user_id`.
pub fn set_member_role(
    members: &mut [NoteMember],
    user_id: &str,
    role: MemberRole,
) -> Result<(), MemberError> {
    match members.iter_mut().find(|member| member.user_id == user_id) {
        Some(member) => {
            member.role = role;
            Ok(())
        }
        None => Err(MemberError::UnknownMember(user_id.to_string())),
    }
}
