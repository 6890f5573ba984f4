//! Per-instance session state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine lifecycle.
///
/// `NotStarted → Running → Ended`, with `Closed` reachable from anywhere.
/// `Ended` may go back to `Running` through a fresh `start()` (play again).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Running,
    Ended,
    Closed,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lifecycle::NotStarted => "not started",
            Lifecycle::Running => "running",
            Lifecycle::Ended => "ended",
            Lifecycle::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Shared session fields every game has.
///
/// Game-specific content (questions, animals, schedules) lives in the rules;
/// this struct only carries what the engine itself drives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Increments on every `start()` of the same engine.
    pub id: u64,

    pub lifecycle: Lifecycle,

    /// Running score. Never negative; penalties saturate at zero.
    pub score: u32,

    /// Engine clock reading when the session started.
    pub started_at: Duration,

    /// Seconds left on the countdown, `None` for games without one.
    pub time_remaining: Option<u32>,

    /// Countdown ticks that have fired since start.
    pub ticks_elapsed: u32,

    /// Zero-based round, level, question or scenario index.
    pub round_index: u32,

    /// True while a feedback window is open.
    pub input_blocked: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            id: 0,
            lifecycle: Lifecycle::NotStarted,
            score: 0,
            started_at: Duration::ZERO,
            time_remaining: None,
            ticks_elapsed: 0,
            round_index: 0,
            input_blocked: false,
        }
    }
}

impl GameSession {
    /// A fresh running session.
    #[must_use]
    pub fn begin(id: u64, started_at: Duration) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::Running,
            started_at,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Subtract a penalty, stopping at zero.
    pub fn deduct_points(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    /// Whole seconds between the session start and `at`.
    #[must_use]
    pub fn elapsed_secs(&self, at: Duration) -> u64 {
        at.saturating_sub(self.started_at).as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_resets_fields() {
        let session = GameSession::begin(3, Duration::from_secs(10));
        assert_eq!(session.id, 3);
        assert!(session.is_running());
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining, None);
        assert!(!session.input_blocked);
    }

    #[test]
    fn test_penalty_saturates() {
        let mut session = GameSession::begin(1, Duration::ZERO);
        session.add_points(3);
        session.deduct_points(5);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_elapsed_truncates_to_whole_seconds() {
        let session = GameSession::begin(1, Duration::from_millis(500));
        assert_eq!(session.elapsed_secs(Duration::from_millis(3_499)), 2);
        assert_eq!(session.elapsed_secs(Duration::ZERO), 0);
    }

    #[test]
    fn test_lifecycle_display() {
        assert_eq!(Lifecycle::NotStarted.to_string(), "not started");
        assert_eq!(Lifecycle::Closed.to_string(), "closed");
    }
}
