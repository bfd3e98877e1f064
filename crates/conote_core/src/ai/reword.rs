//! Reword proposals over plain text.
//!
//! # Responsibility
//! - Extract plain text from a working copy and pass it to the engine.
//! - Wrap the candidate so it can only be applied through an explicit
//!   session action, never auto-applied or written to the store.
//!
//! # Invariants
//! - Blank source text short-circuits to itself without consulting the
//!   engine.
//! - The engine sees and returns plain text only; block structure never
//!   crosses this boundary.

use crate::model::content::to_plain_text;
use crate::session::WorkingCopy;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a reword engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewordError {
    /// Engine-side failure, kept as a message envelope.
    Engine(String),
}

impl Display for RewordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(message) => write!(f, "reword engine failure: {message}"),
        }
    }
}

impl Error for RewordError {}

/// External engine turning note text into a reworded candidate.
pub trait RewordEngine {
    fn reword(&self, text: &str) -> Result<String, RewordError>;
}

/// Candidate produced by the engine for one working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewordProposal {
    /// Plain text the engine was given.
    pub source_text: String,
    /// Plain-text candidate the user may accept.
    pub candidate: String,
}

/// How an accepted candidate lands in the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewordAction {
    /// Replace the draft content with the candidate.
    Replace,
    /// Append the candidate after the existing draft content.
    Append,
}

/// Extracts the working copy's plain text and asks the engine for a
/// candidate. Blank text is returned unchanged without an engine call.
pub fn propose_reword<E: RewordEngine + ?Sized>(
    engine: &E,
    working: &WorkingCopy,
) -> Result<RewordProposal, RewordError> {
    let source_text = to_plain_text(&working.content);
    if source_text.trim().is_empty() {
        return Ok(RewordProposal {
            candidate: source_text.clone(),
            source_text,
        });
    }

    let candidate = engine.reword(&source_text)?;
    Ok(RewordProposal {
        source_text,
        candidate,
    })
}

#[cfg(test)]
mod tests {
    use super::{propose_reword, RewordEngine, RewordError};
    use crate::model::content::ContentBlock;
    use crate::session::WorkingCopy;
    use std::cell::Cell;

    struct CountingEngine {
        calls: Cell<u32>,
    }

    impl RewordEngine for CountingEngine {
        fn reword(&self, text: &str) -> Result<String, RewordError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("reworded: {text}"))
        }
    }

    fn copy(lines: &[&str]) -> WorkingCopy {
        WorkingCopy {
            title: "t".to_string(),
            content: lines.iter().map(|line| ContentBlock::paragraph(line)).collect(),
        }
    }

    #[test]
    fn blank_text_short_circuits_without_engine_call() {
        let engine = CountingEngine { calls: Cell::new(0) };
        let proposal = propose_reword(&engine, &copy(&["", "  "])).unwrap();
        assert_eq!(proposal.candidate, proposal.source_text);
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn engine_receives_joined_plain_text() {
        let engine = CountingEngine { calls: Cell::new(0) };
        let proposal = propose_reword(&engine, &copy(&["one", "two"])).unwrap();
        assert_eq!(proposal.source_text, "one\ntwo");
        assert_eq!(proposal.candidate, "reworded: one\ntwo");
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn engine_errors_propagate() {
        struct FailingEngine;
        impl RewordEngine for FailingEngine {
            fn reword(&self, _text: &str) -> Result<String, RewordError> {
                Err(RewordError::Engine("model not loaded".to_string()))
            }
        }

        let err = propose_reword(&FailingEngine, &copy(&["body"])).unwrap_err();
        assert_eq!(err, RewordError::Engine("model not loaded".to_string()));
    }
}
