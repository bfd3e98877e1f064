//! Canonical in-memory note collection backed by a durable slot.
//!
//! # Responsibility
//! - Own the note collection of one identity and its versioned mutation
//!   path (create/update/delete).
//! - Keep the durable slot and the in-memory state in lockstep
//!   (persist-then-apply), and broadcast every persisted change.
//! - Absorb external slot mutations by full in-memory replacement.
//!
//! # Invariants
//! - The store alone assigns version numbers; a patch cannot carry one.
//! - A mutation that fails to persist leaves memory and slot unchanged.
//! - Conflict detection is not this layer's job; stale edits surface in
//!   the edit session at save time.

use crate::model::identity::Identity;
use crate::model::note::{Note, NoteId, NotePatch, VersionEntry};
use crate::model::now_epoch_ms;
use crate::notify::{ChangeBus, ChangeEvent, Subscription};
use crate::store::seed::{owns_any_note, seed_notes, SEED_NOTE_COUNT};
use crate::store::slot_store::{SlotError, SlotStore, NOTES_SLOT};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Default page size for note listings.
const NOTES_PAGE_SIZE: u32 = 20;
/// Hard cap for one listing page.
const NOTES_PAGE_MAX: u32 = 50;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
///
/// Recoverable conditions (missing slot, malformed payload, unknown id)
/// are handled in place and never surface here.
#[derive(Debug)]
pub enum StoreError {
    Slot(SlotError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize note collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<SlotError> for StoreError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

/// Single authority for one identity's note collection.
///
/// Instances are single-threaded and synchronous; several instances may
/// share one durable medium and coordinate only through the change bus.
pub struct NoteStore<S: SlotStore> {
    slots: S,
    bus: Arc<dyn ChangeBus>,
    subscription: Subscription,
    notes: Vec<Note>,
}

impl<S: SlotStore> NoteStore<S> {
    /// Opens a store: subscribes to the bus, restores the collection and
    /// seeds a default set when `identity` owns no note.
    ///
    /// A missing or malformed payload restores as an empty collection;
    /// only a failing slot backend is fatal.
    pub fn open(slots: S, bus: Arc<dyn ChangeBus>, identity: &Identity) -> StoreResult<Self> {
        let subscription = bus.subscribe();
        let mut store = Self {
            slots,
            bus,
            subscription,
            notes: Vec::new(),
        };

        store.notes = store.load()?;
        info!(
            "event=notes_load module=store status=ok count={}",
            store.notes.len()
        );

        if !owns_any_note(&store.notes, identity) {
            let mut next = store.notes.clone();
            next.extend(seed_notes(identity, now_epoch_ms()));
            store.persist_and_apply(next)?;
            info!(
                "event=notes_seed module=store status=ok count={}",
                SEED_NOTE_COUNT
            );
        }

        Ok(store)
    }

    /// Restores the collection from the durable slot.
    fn load(&self) -> StoreResult<Vec<Note>> {
        let Some(payload) = self.slots.get(NOTES_SLOT)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&payload) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!("event=notes_load module=store status=recovered error={err}");
                Ok(Vec::new())
            }
        }
    }

    /// Current collection, newest creation first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up one note by id.
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// One listing page; `limit` defaults to 20 and clamps to 50.
    pub fn list_notes(&self, offset: usize, limit: Option<u32>) -> &[Note] {
        let limit = limit.unwrap_or(NOTES_PAGE_SIZE).min(NOTES_PAGE_MAX) as usize;
        let start = offset.min(self.notes.len());
        let end = (start + limit).min(self.notes.len());
        &self.notes[start..end]
    }

    /// Creates a version-1 note owned by `creator` and prepends it to the
    /// collection.
    ///
    /// Returns the created note so the caller can immediately open an
    /// edit session on it.
    pub fn create_note(&mut self, title: &str, creator: &Identity) -> StoreResult<Note> {
        let note = Note::new(title, creator, now_epoch_ms());
        let mut next = self.notes.clone();
        next.insert(0, note.clone());
        self.persist_and_apply(next)?;
        info!(
            "event=note_create module=store status=ok note_id={} version=1",
            note.id
        );
        Ok(note)
    }

    /// Applies `patch` to one note as the next version.
    ///
    /// An unknown id is a no-op: deletions race with updates and that is
    /// expected, not an error. The version in storage is authoritative;
    /// the patch carries none.
    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> StoreResult<()> {
        let Some(position) = self.notes.iter().position(|note| note.id == id) else {
            debug!("event=note_update module=store status=skipped note_id={id} reason=absent");
            return Ok(());
        };

        let mut next = self.notes.clone();
        let note = &mut next[position];
        let next_version = note.version + 1;
        let now_ms = now_epoch_ms();

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(members) = patch.members {
            note.members = members;
        }
        note.version = next_version;
        note.updated_at = now_ms;
        note.version_history.push(VersionEntry {
            version: next_version,
            title: note.title.clone(),
            content: note.content.clone(),
            updated_at: now_ms,
        });

        self.persist_and_apply(next)?;
        info!(
            "event=note_update module=store status=ok note_id={id} version={next_version}"
        );
        Ok(())
    }

    /// Removes one note; removing an absent id is a no-op.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        if self.note(id).is_none() {
            debug!("event=note_delete module=store status=skipped note_id={id} reason=absent");
            return Ok(());
        }
        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        self.persist_and_apply(next)?;
        info!("event=note_delete module=store status=ok note_id={id}");
        Ok(())
    }

    /// Drains pending external-change events and fully replaces the
    /// in-memory collection with the latest well-formed payload.
    ///
    /// No per-note reconciliation happens here; unsaved working copies in
    /// open edit sessions are untouched until they attempt to save.
    /// Returns whether a replacement was applied.
    pub fn apply_external_changes(&mut self) -> bool {
        let mut replaced = false;
        for event in self.subscription.drain() {
            if event.slot != NOTES_SLOT {
                continue;
            }
            match serde_json::from_str::<Vec<Note>>(&event.payload) {
                Ok(notes) => {
                    self.notes = notes;
                    replaced = true;
                }
                Err(err) => {
                    warn!("event=notes_external module=store status=ignored error={err}");
                }
            }
        }
        if replaced {
            info!(
                "event=notes_external module=store status=ok count={}",
                self.notes.len()
            );
        }
        replaced
    }

    /// Persists `next`, then applies it in memory and broadcasts it.
    ///
    /// Ordering is persist-then-apply: a failed write returns before any
    /// visible state changes.
    fn persist_and_apply(&mut self, next: Vec<Note>) -> StoreResult<()> {
        let payload = serde_json::to_string(&next).map_err(StoreError::Serialize)?;
        self.slots.put(NOTES_SLOT, &payload)?;
        self.notes = next;
        self.bus.publish(
            self.subscription.id(),
            ChangeEvent {
                slot: NOTES_SLOT.to_string(),
                payload,
            },
        );
        Ok(())
    }
}

impl<S: SlotStore> Drop for NoteStore<S> {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription.id());
    }
}
