//! Animal care rules.

use std::convert::Infallible;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::herd::{builtin_feeds, Animal, AnimalKind, Feed};
use crate::catalog::GameKind;
use crate::core::GameError;
use crate::rules::{GameRules, RulesContext};
use crate::session::{EndReason, GameSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalConfig {
    pub feeds: Vec<Feed>,
    pub starting_budget: u32,
    /// Added to the budget at the start of every round after the first.
    pub budget_per_round: u32,
    pub max_rounds: u32,
    /// Countdown per round, reset when the next round starts.
    pub round_time_secs: u32,
    pub feedback_ms: u64,
}

impl Default for AnimalConfig {
    fn default() -> Self {
        Self {
            feeds: builtin_feeds(),
            starting_budget: 50,
            budget_per_round: 20,
            max_rounds: 5,
            round_time_secs: 60,
            feedback_ms: 2000,
        }
    }
}

impl AnimalConfig {
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, starting: u32, per_round: u32) -> Self {
        self.starting_budget = starting;
        self.budget_per_round = per_round;
        self
    }

    #[must_use]
    pub fn with_round_time(mut self, secs: u32) -> Self {
        self.round_time_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.feeds.is_empty() {
            return Err(GameError::config("at least one feed is required"));
        }
        if self.max_rounds == 0 {
            return Err(GameError::config("max_rounds must be at least 1"));
        }
        if self.round_time_secs == 0 {
            return Err(GameError::config("round_time_secs must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimalPhase {
    Waiting,
    Feeding,
    Feedback,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimalAction {
    /// Give the current animal the feed at this index.
    Feed(usize),
}

/// Feed a cow, a goat and a chicken in turn on a shared budget.
#[derive(Clone, Debug)]
pub struct AnimalGame {
    config: AnimalConfig,
    phase: AnimalPhase,
    animals: Vec<Animal>,
    current: usize,
    budget: u32,
    round: u32,
    rounds_completed: u32,
}

impl Default for AnimalGame {
    fn default() -> Self {
        Self::with_config(AnimalConfig::default())
    }
}

impl AnimalGame {
    pub fn new(config: AnimalConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: AnimalConfig) -> Self {
        let budget = config.starting_budget;
        Self {
            config,
            phase: AnimalPhase::Waiting,
            animals: Vec::new(),
            current: 0,
            budget,
            round: 1,
            rounds_completed: 0,
        }
    }

    #[must_use]
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// Index of the animal being fed.
    #[must_use]
    pub fn current_animal(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Current round, one-based.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    fn next_round(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.rounds_completed += 1;
        if self.round >= self.config.max_rounds {
            self.phase = AnimalPhase::Finished;
            ctx.end(EndReason::Completed);
            return;
        }

        for animal in &mut self.animals {
            animal.decay(ctx.rng);
        }
        self.round += 1;
        self.current = 0;
        self.budget = self.budget.saturating_add(self.config.budget_per_round);
        self.phase = AnimalPhase::Feeding;
        ctx.session.round_index = self.round - 1;
        ctx.session.time_remaining = Some(self.config.round_time_secs);
    }
}

impl GameRules for AnimalGame {
    type Phase = AnimalPhase;
    type Action = AnimalAction;
    type Config = AnimalConfig;
    type Timer = Infallible;

    fn kind(&self) -> GameKind {
        GameKind::AnimalCare
    }

    fn config(&self) -> &AnimalConfig {
        &self.config
    }

    fn phase(&self) -> AnimalPhase {
        self.phase
    }

    fn setup(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.animals = AnimalKind::ALL
            .iter()
            .map(|&kind| Animal::spawn(kind, ctx.rng))
            .collect();
        self.current = 0;
        self.budget = self.config.starting_budget;
        self.round = 1;
        self.rounds_completed = 0;
        self.phase = AnimalPhase::Feeding;

        ctx.session.round_index = 0;
        ctx.session.time_remaining = Some(self.config.round_time_secs);
    }

    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, Infallible>,
        action: AnimalAction,
    ) -> Result<(), GameError> {
        let AnimalAction::Feed(index) = action;
        if self.phase != AnimalPhase::Feeding {
            return Err(GameError::InputBlocked);
        }
        let feed = self.config.feeds.get(index).ok_or(GameError::InvalidChoice {
            index,
            len: self.config.feeds.len(),
        })?;
        if feed.cost > self.budget {
            return Err(GameError::InsufficientBudget {
                cost: feed.cost,
                budget: self.budget,
            });
        }
        let animal = self
            .animals
            .get_mut(self.current)
            .ok_or(GameError::InputBlocked)?;

        self.budget -= feed.cost;
        let improvement = animal.feed(feed);
        ctx.session.add_points(improvement.max(0) as u32);
        ctx.notice(format!(
            "{} for the {}: {improvement:+} points",
            feed.name,
            animal.kind.name()
        ));

        self.phase = AnimalPhase::Feedback;
        ctx.open_feedback(Duration::from_millis(self.config.feedback_ms));
        Ok(())
    }

    fn on_feedback_closed(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        if self.current + 1 >= self.animals.len() {
            self.next_round(ctx);
        } else {
            self.current += 1;
            self.phase = AnimalPhase::Feeding;
        }
    }

    fn finish(&mut self, ctx: &mut RulesContext<'_, Infallible>) -> u32 {
        self.phase = AnimalPhase::Finished;
        let bonus = self.animals.iter().map(Animal::wellbeing_bonus).sum();
        if bonus > 0 {
            ctx.notice(format!("Healthy animals bonus: +{bonus}"));
        }
        bonus
    }

    fn summary(&self, _session: &GameSession) -> String {
        format!(
            "{} of {} rounds completed",
            self.rounds_completed, self.config.max_rounds
        )
    }
}
