//! Pattern memory rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::GameKind;
use crate::core::{GameError, GameRng};
use crate::rules::{GameRules, RulesContext};
use crate::session::{EndReason, GameSession};

/// Cell sequence for one level. Inline up to the default maximum length.
pub type Sequence = SmallVec<[u8; 10]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Completing this level ends the game.
    pub max_level: u32,
    /// Number of grid cells (3×3 by default).
    pub grid_size: u8,
    /// Sequence length is `min(level + 2, max_sequence_len)`.
    pub max_sequence_len: usize,
    /// Points per level are `points_per_level × level`.
    pub points_per_level: u32,
    /// Each cell stays highlighted this long.
    pub reveal_interval_ms: u64,
    /// Pause between the last reveal and accepting input.
    pub input_delay_ms: u64,
    /// Pause between a completed level and the next reveal.
    pub level_pause_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_level: 8,
            grid_size: 9,
            max_sequence_len: 10,
            points_per_level: 10,
            reveal_interval_ms: 1000,
            input_delay_ms: 500,
            level_pause_ms: 1000,
        }
    }
}

impl MemoryConfig {
    #[must_use]
    pub fn with_max_level(mut self, level: u32) -> Self {
        self.max_level = level;
        self
    }

    #[must_use]
    pub fn with_grid_size(mut self, cells: u8) -> Self {
        self.grid_size = cells;
        self
    }

    /// Length of the sequence shown at `level` (one-based).
    #[must_use]
    pub fn sequence_len(&self, level: u32) -> usize {
        (level as usize + 2).min(self.max_sequence_len)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_level == 0 {
            return Err(GameError::config("max_level must be at least 1"));
        }
        if self.grid_size == 0 {
            return Err(GameError::config("grid_size must be at least 1"));
        }
        if self.max_sequence_len == 0 {
            return Err(GameError::config("max_sequence_len must be at least 1"));
        }
        if self.reveal_interval_ms == 0 {
            return Err(GameError::config("reveal_interval_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPhase {
    Waiting,
    /// Cells are being revealed one by one. Input is refused.
    Showing,
    Input,
    /// Short pause after a completed level.
    LevelComplete,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryAction {
    /// Press the grid cell with this index.
    Press(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryTimer {
    RevealNext,
    OpenInput,
    NextLevel,
}

/// Watch a sequence of grid cells, then repeat it. One mistake ends the game.
#[derive(Clone, Debug)]
pub struct MemoryGame {
    config: MemoryConfig,
    phase: MemoryPhase,
    level: u32,
    sequence: Sequence,
    entered: usize,
    showing: Option<usize>,
    levels_completed: u32,
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::with_config(MemoryConfig::default())
    }
}

impl MemoryGame {
    pub fn new(config: MemoryConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: MemoryConfig) -> Self {
        Self {
            config,
            phase: MemoryPhase::Waiting,
            level: 1,
            sequence: Sequence::new(),
            entered: 0,
            showing: None,
            levels_completed: 0,
        }
    }

    /// Current level, one-based.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Cell highlighted right now during the reveal.
    #[must_use]
    pub fn highlighted_cell(&self) -> Option<u8> {
        self.showing.and_then(|i| self.sequence.get(i).copied())
    }

    /// Correct presses so far in the current level.
    #[must_use]
    pub fn entered(&self) -> usize {
        self.entered
    }

    #[must_use]
    pub fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    fn begin_level(&mut self, ctx: &mut RulesContext<'_, MemoryTimer>) {
        self.sequence = generate_sequence(
            ctx.rng,
            self.config.sequence_len(self.level),
            self.config.grid_size,
        );
        self.entered = 0;
        self.showing = Some(0);
        self.phase = MemoryPhase::Showing;
        ctx.session.round_index = self.level - 1;
        ctx.after(self.reveal_interval(), MemoryTimer::RevealNext);
    }

    fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.config.reveal_interval_ms)
    }
}

/// Random cells, repeats allowed. An empty grid yields an empty sequence.
pub fn generate_sequence(rng: &mut GameRng, len: usize, grid_size: u8) -> Sequence {
    if grid_size == 0 {
        return Sequence::new();
    }
    (0..len).map(|_| rng.gen_range(0..grid_size)).collect()
}

impl GameRules for MemoryGame {
    type Phase = MemoryPhase;
    type Action = MemoryAction;
    type Config = MemoryConfig;
    type Timer = MemoryTimer;

    fn kind(&self) -> GameKind {
        GameKind::PatternMemory
    }

    fn config(&self) -> &MemoryConfig {
        &self.config
    }

    fn phase(&self) -> MemoryPhase {
        self.phase
    }

    fn setup(&mut self, ctx: &mut RulesContext<'_, MemoryTimer>) {
        self.level = 1;
        self.levels_completed = 0;
        ctx.session.time_remaining = None;
        self.begin_level(ctx);
    }

    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, MemoryTimer>,
        action: MemoryAction,
    ) -> Result<(), GameError> {
        let MemoryAction::Press(cell) = action;
        if self.phase != MemoryPhase::Input {
            return Err(GameError::InputBlocked);
        }
        if cell >= self.config.grid_size {
            return Err(GameError::InvalidChoice {
                index: usize::from(cell),
                len: usize::from(self.config.grid_size),
            });
        }

        if self.sequence.get(self.entered) != Some(&cell) {
            self.phase = MemoryPhase::Finished;
            ctx.notice(format!("Wrong cell at step {}", self.entered + 1));
            ctx.end(EndReason::Mistake);
            return Ok(());
        }

        self.entered += 1;
        if self.entered < self.sequence.len() {
            return Ok(());
        }

        let points = self.config.points_per_level.saturating_mul(self.level);
        ctx.session.add_points(points);
        self.levels_completed += 1;
        ctx.notice(format!("Level {} complete! +{points}", self.level));

        if self.level >= self.config.max_level {
            self.phase = MemoryPhase::Finished;
            ctx.end(EndReason::Completed);
        } else {
            self.phase = MemoryPhase::LevelComplete;
            ctx.after(
                Duration::from_millis(self.config.level_pause_ms),
                MemoryTimer::NextLevel,
            );
        }
        Ok(())
    }

    fn on_timer(&mut self, ctx: &mut RulesContext<'_, MemoryTimer>, timer: MemoryTimer) {
        match timer {
            MemoryTimer::RevealNext => {
                let next = self.showing.map_or(0, |i| i + 1);
                if next < self.sequence.len() {
                    self.showing = Some(next);
                    ctx.after(self.reveal_interval(), MemoryTimer::RevealNext);
                } else {
                    self.showing = None;
                    ctx.after(
                        Duration::from_millis(self.config.input_delay_ms),
                        MemoryTimer::OpenInput,
                    );
                }
            }
            MemoryTimer::OpenInput => {
                self.phase = MemoryPhase::Input;
            }
            MemoryTimer::NextLevel => {
                self.level += 1;
                self.begin_level(ctx);
            }
        }
    }

    fn finish(&mut self, _ctx: &mut RulesContext<'_, MemoryTimer>) -> u32 {
        self.phase = MemoryPhase::Finished;
        self.showing = None;
        0
    }

    fn summary(&self, _session: &GameSession) -> String {
        format!("{} levels completed", self.levels_completed)
    }
}
