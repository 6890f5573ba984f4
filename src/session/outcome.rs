//! Finalized session results.

use serde::{Deserialize, Serialize};

use crate::catalog::GameKind;

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// Countdown reached zero.
    TimeUp,
    /// All questions, rounds or levels were played.
    Completed,
    /// Wrong input in a game that ends on the first mistake.
    Mistake,
}

/// What the host receives exactly once per finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub session_id: u64,
    pub kind: GameKind,
    /// Running score plus end-of-game bonus.
    pub score: u32,
    /// Of which end-of-game bonus.
    pub bonus: u32,
    /// Whole seconds from start to finalization.
    pub duration_secs: u64,
    pub reason: EndReason,
    /// One-based level or round reached.
    pub level: u32,
    /// Human-readable end line, e.g. "7 out of 10 correct".
    pub summary: String,
}

impl Outcome {
    /// True when the player reached the end of the content.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.reason == EndReason::Completed
    }
}
