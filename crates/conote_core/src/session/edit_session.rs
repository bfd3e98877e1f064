//! Versioned edit session state machine.
//!
//! # Responsibility
//! - Hold the working copy of one note edit together with the pinned
//!   base version.
//! - Decide at save time whether the edit is safe or in conflict.
//!
//! # Invariants
//! - The store is never touched by a refused save.
//! - `Closed` is terminal; reopening always yields a fresh `Editing`
//!   session with a freshly pinned base version.
//! - Resolution re-pins the base version and returns to `Editing`
//!   without persisting anything.

use crate::ai::{RewordAction, RewordProposal};
use crate::model::content::{blocks_from_plain_text, ContentBlock};
use crate::model::note::{Note, NoteId, NotePatch};
use crate::session::conflict::ResolutionPolicy;
use crate::store::{NoteStore, SlotStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// In-session mutable draft of a note's title and content.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCopy {
    pub title: String,
    pub content: Vec<ContentBlock>,
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Conflict,
    Closed,
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Editing => "editing",
            Self::Conflict => "conflict",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Result of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The working copy was persisted (or the note was already gone and
    /// the session closed over the tolerated delete race).
    Saved,
    /// The stored version moved past the base version; the session is
    /// now in conflict and the store was not touched.
    Conflict,
}

/// Failure of a session operation.
///
/// A version mismatch is not an error; it is the designed `Conflict`
/// outcome.
#[derive(Debug)]
pub enum SessionError {
    /// Operation requires a state the session is not in.
    InvalidState {
        expected: SessionState,
        actual: SessionState,
    },
    /// Resolution needs the stored note, but it was deleted meanwhile.
    NoteGone(NoteId),
    /// Persistence failed; the session stays open so the edit survives.
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState { expected, actual } => {
                write!(f, "session is {actual}, operation requires {expected}")
            }
            Self::NoteGone(id) => write!(f, "note no longer exists: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Conflict-aware editor for one note.
pub struct EditSession {
    note_id: NoteId,
    base_version: u32,
    working: WorkingCopy,
    state: SessionState,
}

impl EditSession {
    /// Opens a fresh session: seeds the working copy from `note` and pins
    /// its current version as the base.
    pub fn open(note: &Note) -> Self {
        Self {
            note_id: note.id,
            base_version: note.version,
            working: WorkingCopy {
                title: note.title.clone(),
                content: note.content.clone(),
            },
            state: SessionState::Editing,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Version pinned when the session opened or last resolved.
    pub fn base_version(&self) -> u32 {
        self.base_version
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn working(&self) -> &WorkingCopy {
        &self.working
    }

    /// Replaces the draft title. Allowed while the session is open,
    /// including in conflict (the user keeps typing; only save is gated).
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.require_open()?;
        self.working.title = title.into();
        Ok(())
    }

    /// Replaces the draft content blocks.
    pub fn set_content(&mut self, content: Vec<ContentBlock>) -> Result<(), SessionError> {
        self.require_open()?;
        self.working.content = content;
        Ok(())
    }

    /// Attempts to persist the working copy.
    ///
    /// The stored version is read first; a mismatch refuses the save,
    /// moves the session to `Conflict` and leaves the store untouched.
    /// A matching version saves through the store's versioned update path
    /// and closes the session. A note deleted meanwhile closes the
    /// session without writing (the tolerated delete race).
    pub fn save<S: SlotStore>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> Result<SaveOutcome, SessionError> {
        self.require_state(SessionState::Editing)?;

        let Some(current) = store.note(self.note_id) else {
            self.state = SessionState::Closed;
            return Ok(SaveOutcome::Saved);
        };

        if current.version != self.base_version {
            info!(
                "event=session_conflict module=session status=detected note_id={} base_version={} current_version={}",
                self.note_id, self.base_version, current.version
            );
            self.state = SessionState::Conflict;
            return Ok(SaveOutcome::Conflict);
        }

        store.update_note(
            self.note_id,
            NotePatch {
                title: Some(self.working.title.clone()),
                content: Some(self.working.content.clone()),
                members: None,
            },
        )?;
        self.state = SessionState::Closed;
        Ok(SaveOutcome::Saved)
    }

    /// Abandons the edit with no persisted side effect. Permitted from
    /// any non-terminal state.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.require_open()?;
        self.state = SessionState::Closed;
        Ok(())
    }

    /// Applies one resolution policy to the working copy, re-pins the
    /// base version to the note's now-current version and returns the
    /// session to `Editing`. Nothing persists until a later save.
    pub fn resolve<S: SlotStore>(
        &mut self,
        policy: ResolutionPolicy,
        store: &NoteStore<S>,
    ) -> Result<(), SessionError> {
        self.require_state(SessionState::Conflict)?;

        let Some(current) = store.note(self.note_id) else {
            return Err(SessionError::NoteGone(self.note_id));
        };

        policy.apply(&mut self.working, current);
        self.base_version = current.version;
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Applies an accepted reword candidate to the working copy.
    ///
    /// The candidate is never auto-applied and never reaches the store
    /// directly; it becomes part of the draft and is persisted only by a
    /// later explicit save.
    pub fn apply_reword(
        &mut self,
        proposal: &RewordProposal,
        action: RewordAction,
    ) -> Result<(), SessionError> {
        self.require_state(SessionState::Editing)?;
        match action {
            RewordAction::Replace => {
                self.working.content = blocks_from_plain_text(&proposal.candidate);
            }
            RewordAction::Append => {
                self.working
                    .content
                    .extend(blocks_from_plain_text(&proposal.candidate));
            }
        }
        Ok(())
    }

    fn require_state(&self, expected: SessionState) -> Result<(), SessionError> {
        if self.state != expected {
            return Err(SessionError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    fn require_open(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Closed {
            return Err(SessionError::InvalidState {
                expected: SessionState::Editing,
                actual: self.state,
            });
        }
        Ok(())
    }
}
