//! Per-player progress aggregated from finished sessions.
//!
//! `ProgressBook` implements [`GameHost`], so it can be handed straight to an
//! engine (or borrowed mutably by several engines in turn) and will fold
//! every reported outcome into the matching game's record.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::registry::GameKind;
use crate::session::{GameHost, Outcome};

/// Running totals for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub kind: GameKind,
    /// Highest level or round ever reached.
    pub level: u32,
    pub last_score: u32,
    pub high_score: u32,
    pub times_played: u32,
    pub total_time_secs: u64,
    /// Sessions that reached the end of their content.
    pub completed_sessions: u32,
}

impl GameProgress {
    #[must_use]
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            level: 1,
            last_score: 0,
            high_score: 0,
            times_played: 0,
            total_time_secs: 0,
            completed_sessions: 0,
        }
    }

    /// Fold one outcome in. Returns true if it set a new high score.
    pub fn record(&mut self, outcome: &Outcome) -> bool {
        debug_assert_eq!(outcome.kind, self.kind);

        self.times_played += 1;
        self.total_time_secs += outcome.duration_secs;
        self.last_score = outcome.score;
        self.level = self.level.max(outcome.level);
        if outcome.completed() {
            self.completed_sessions += 1;
        }

        let improved = outcome.score > self.high_score;
        if improved {
            self.high_score = outcome.score;
        }
        improved
    }

    /// Mean play time per session, in whole seconds.
    #[must_use]
    pub fn average_duration_secs(&self) -> u64 {
        match self.times_played {
            0 => 0,
            n => self.total_time_secs / u64::from(n),
        }
    }
}

/// Progress for every game a player has finished at least once.
#[derive(Clone, Debug, Default)]
pub struct ProgressBook {
    games: FxHashMap<GameKind, GameProgress>,
}

impl ProgressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, kind: GameKind) -> Option<&GameProgress> {
        self.games.get(&kind)
    }

    /// Record an outcome. Returns true on a new high score.
    pub fn record(&mut self, outcome: &Outcome) -> bool {
        self.games
            .entry(outcome.kind)
            .or_insert_with(|| GameProgress::new(outcome.kind))
            .record(outcome)
    }

    /// Sum of play time across all games.
    #[must_use]
    pub fn total_time_secs(&self) -> u64 {
        self.games.values().map(|p| p.total_time_secs).sum()
    }

    /// Records sorted by kind.
    pub fn iter(&self) -> impl Iterator<Item = &GameProgress> {
        let mut list: Vec<_> = self.games.values().collect();
        list.sort_by_key(|p| p.kind);
        list.into_iter()
    }
}

impl GameHost for ProgressBook {
    fn on_complete(&mut self, outcome: &Outcome) {
        if self.record(outcome) {
            tracing::debug!(game = %outcome.kind, score = outcome.score, "new high score");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EndReason;

    fn outcome(kind: GameKind, score: u32, secs: u64, reason: EndReason, level: u32) -> Outcome {
        Outcome {
            session_id: 1,
            kind,
            score,
            bonus: 0,
            duration_secs: secs,
            reason,
            level,
            summary: String::new(),
        }
    }

    #[test]
    fn test_record_tracks_high_score() {
        let mut progress = GameProgress::new(GameKind::Math);

        assert!(progress.record(&outcome(GameKind::Math, 70, 25, EndReason::Completed, 10)));
        assert!(!progress.record(&outcome(GameKind::Math, 40, 30, EndReason::TimeUp, 6)));

        assert_eq!(progress.high_score, 70);
        assert_eq!(progress.last_score, 40);
        assert_eq!(progress.times_played, 2);
        assert_eq!(progress.total_time_secs, 55);
        assert_eq!(progress.completed_sessions, 1);
        assert_eq!(progress.level, 10);
        assert_eq!(progress.average_duration_secs(), 27);
    }

    #[test]
    fn test_book_keeps_games_apart() {
        let mut book = ProgressBook::new();
        book.on_complete(&outcome(GameKind::Math, 50, 20, EndReason::Completed, 10));
        book.on_complete(&outcome(GameKind::PatternMemory, 60, 40, EndReason::Mistake, 4));

        assert_eq!(book.get(GameKind::Math).map(|p| p.high_score), Some(50));
        assert_eq!(book.get(GameKind::PatternMemory).map(|p| p.times_played), Some(1));
        assert!(book.get(GameKind::AnimalCare).is_none());
        assert_eq!(book.total_time_secs(), 60);

        let kinds: Vec<_> = book.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![GameKind::Math, GameKind::PatternMemory]);
    }

    #[test]
    fn test_average_with_no_sessions() {
        assert_eq!(GameProgress::new(GameKind::AnimalCare).average_duration_secs(), 0);
    }
}
