//! Role lookup and affordance checks.
//!
//! # Invariants
//! - Lookup order is user id, then email, then the `Viewer` default;
//!   every identity that can reach a note is at least a viewer.
//! - These checks gate UI affordances only; they are not a security
//!   boundary for the underlying storage.

use crate::model::identity::Identity;
use crate::model::note::{MemberRole, Note};

/// Resolves the role `identity` holds on `note`.
///
/// One ordered lookup keeps the default-role decision auditable: an
/// explicit membership by user id wins, an email match is the fallback
/// for identities whose id changed between logins, and everything else
/// is a viewer.
pub fn resolve_role(note: &Note, identity: &Identity) -> MemberRole {
    note.members
        .iter()
        .find(|member| member.user_id == identity.id)
        .or_else(|| {
            note.members
                .iter()
                .find(|member| member.email == identity.email)
        })
        .map(|member| member.role)
        .unwrap_or(MemberRole::Viewer)
}

/// Whether `role` may open an edit session.
pub fn can_edit(role: MemberRole) -> bool {
    matches!(role, MemberRole::Owner | MemberRole::Editor)
}

/// Whether `role` may delete the note. Deletion is not owner-restricted.
pub fn can_delete(role: MemberRole) -> bool {
    matches!(role, MemberRole::Owner | MemberRole::Editor)
}
