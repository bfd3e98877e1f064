//! Core domain logic for conote, a local-first collaborative note store.
//! This crate is the single source of truth for business invariants.

pub mod access;
pub mod ai;
pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod session;
pub mod store;

pub use access::{can_delete, can_edit, resolve_role};
pub use ai::{propose_reword, RewordAction, RewordEngine, RewordError, RewordProposal};
pub use auth::{AuthError, AuthResult, IdentityStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::content::{
    blocks_from_plain_text, default_content, to_plain_text, ContentBlock,
};
pub use model::identity::Identity;
pub use model::note::{
    add_member, set_member_role, MemberError, MemberRole, Note, NoteId, NoteMember, NotePatch,
    VersionEntry,
};
pub use notify::{ChangeBus, ChangeEvent, LocalChangeBus, SubscriberId, Subscription};
pub use session::{
    EditSession, ResolutionPolicy, SaveOutcome, SessionError, SessionState, WorkingCopy,
};
pub use store::{
    NoteStore, SlotError, SlotStore, SqliteSlotStore, StoreError, StoreResult, IDENTITY_SLOT,
    NOTES_SLOT,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
