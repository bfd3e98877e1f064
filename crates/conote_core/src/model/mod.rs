//! Canonical domain model for the versioned note collection.
//!
//! # Responsibility
//! - Define the serialized shapes shared by storage, sessions and UI layers.
//! - Keep one wire format (camelCase JSON) for the whole collection.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - `version_history` is append-only and its length equals `version`.

pub mod content;
pub mod identity;
pub mod note;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall clock as epoch milliseconds.
///
/// Timestamps in this crate are epoch milliseconds end to end; a clock
/// before the unix epoch is treated as the epoch itself.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::now_epoch_ms;

    #[test]
    fn now_epoch_ms_is_positive_and_monotonic_enough() {
        let first = now_epoch_ms();
        let second = now_epoch_ms();
        assert!(first > 0);
        assert!(second >= first);
    }
}
