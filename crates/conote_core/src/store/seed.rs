//! Bootstrap seeding for first-time identities.
//!
//! # Responsibility
//! - Build the default note set handed to an identity that owns nothing.
//!
//! # Invariants
//! - Every seeded note is at version 2 with a synthetic version-1 entry,
//!   so history length equals version from the start.
//! - The identity is the sole Owner member of every seeded note.

use crate::model::content::{default_content, ContentBlock};
use crate::model::identity::Identity;
use crate::model::note::{MemberRole, Note, NoteMember, VersionEntry};
use uuid::Uuid;

/// Number of notes seeded for a first-time identity.
pub const SEED_NOTE_COUNT: usize = 50;

const SEED_BODY: &str = "Use this note to try editing, inviting members and version history.";

/// Returns whether `identity` holds an Owner membership on any note.
///
/// Matched by user id first, then by email, the same ordered lookup the
/// permission resolver uses.
pub fn owns_any_note(notes: &[Note], identity: &Identity) -> bool {
    notes.iter().any(|note| {
        note.members.iter().any(|member| {
            member.role == MemberRole::Owner
                && (member.user_id == identity.id || member.email == identity.email)
        })
    })
}

/// Builds the default note set for `identity`.
///
/// Each note carries a synthetic version-1 snapshot (the placeholder
/// body) followed by the current version-2 state, so a first-time user
/// sees notes that already have a history to inspect.
pub fn seed_notes(identity: &Identity, now_ms: i64) -> Vec<Note> {
    (1..=SEED_NOTE_COUNT)
        .map(|index| {
            let title = format!("Sample note {index}");
            let content = vec![ContentBlock::paragraph(SEED_BODY)];
            Note {
                id: Uuid::new_v4(),
                title: title.clone(),
                content: content.clone(),
                updated_at: now_ms,
                version: 2,
                version_history: vec![
                    VersionEntry {
                        version: 1,
                        title: title.clone(),
                        content: default_content(),
                        updated_at: now_ms,
                    },
                    VersionEntry {
                        version: 2,
                        title,
                        content,
                        updated_at: now_ms,
                    },
                ],
                members: vec![NoteMember {
                    user_id: identity.id.clone(),
                    email: identity.email.clone(),
                    role: MemberRole::Owner,
                }],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{owns_any_note, seed_notes, SEED_NOTE_COUNT};
    use crate::model::identity::Identity;
    use crate::model::note::{MemberRole, Note};

    fn identity() -> Identity {
        Identity::new("user-1", "first@example.com")
    }

    #[test]
    fn seeds_fifty_notes_at_version_two() {
        let notes = seed_notes(&identity(), 1_000);
        assert_eq!(notes.len(), SEED_NOTE_COUNT);
        for note in &notes {
            assert_eq!(note.version, 2);
            assert_eq!(note.version_history.len(), 2);
            assert_eq!(note.version_history[0].version, 1);
            assert_eq!(note.version_history[1].version, 2);
            assert_eq!(note.members.len(), 1);
            assert_eq!(note.members[0].role, MemberRole::Owner);
            assert_eq!(note.members[0].user_id, "user-1");
        }
    }

    #[test]
    fn seeded_ids_and_titles_are_distinct() {
        let notes = seed_notes(&identity(), 0);
        let mut ids: Vec<_> = notes.iter().map(|note| note.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SEED_NOTE_COUNT);
        assert_ne!(notes[0].title, notes[1].title);
    }

    #[test]
    fn ownership_check_matches_by_id_then_email() {
        let me = identity();
        let by_id = vec![Note::new("mine", &me, 0)];
        assert!(owns_any_note(&by_id, &me));

        let same_email = Identity::new("other-id", "first@example.com");
        assert!(owns_any_note(&by_id, &same_email));

        let stranger = Identity::new("ghost", "ghost@example.com");
        assert!(!owns_any_note(&by_id, &stranger));
        assert!(!owns_any_note(&[], &me));
    }
}
