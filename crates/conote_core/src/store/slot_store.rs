//! Named-slot storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/put/remove over named durable slots of string payloads.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A slot holds at most one payload; `put` replaces it atomically.
//! - Slot names are opaque to this layer.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Slot holding the serialized note collection.
pub const NOTES_SLOT: &str = "notes";
/// Slot holding the serialized current identity.
pub const IDENTITY_SLOT: &str = "identity";

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure raised by a slot backend.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// Non-SQL backend failure, kept as a message envelope.
    Backend(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "slot backend failure: {message}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for named durable slots.
pub trait SlotStore {
    /// Reads one slot payload; `None` when the slot was never written.
    fn get(&self, name: &str) -> SlotResult<Option<String>>;
    /// Writes one slot payload, replacing any previous value.
    fn put(&mut self, name: &str, payload: &str) -> SlotResult<()>;
    /// Deletes one slot; removing an absent slot is a no-op.
    fn remove(&mut self, name: &str) -> SlotResult<()>;
}

/// SQLite-backed slot store over the migrated `slots` table.
///
/// Each application instance opens its own connection; the busy timeout
/// configured at open time lets several instances share one file.
pub struct SqliteSlotStore {
    conn: Connection,
}

impl SqliteSlotStore {
    /// Opens a file-backed slot store, migrating the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> SlotResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory slot store, mainly for tests.
    pub fn in_memory() -> SlotResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl SlotStore for SqliteSlotStore {
    fn get(&self, name: &str) -> SlotResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn put(&mut self, name: &str, payload: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![name, payload],
        )?;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> SlotResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE name = ?1;", [name])?;
        Ok(())
    }
}
