//! Scenario choice rules.

use std::convert::Infallible;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::content::{builtin_scenarios, Resources, Scenario};
use crate::catalog::GameKind;
use crate::core::GameError;
use crate::rules::{GameRules, RulesContext};
use crate::session::{EndReason, GameSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenarios: Vec<Scenario>,
    /// Countdown per scenario, reset when the next one is shown.
    pub time_per_scenario_secs: u32,
    pub feedback_ms: u64,
    pub starting_resources: Resources,
    /// Added to each resource after every choice.
    pub replenish: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            scenarios: builtin_scenarios(),
            time_per_scenario_secs: 45,
            feedback_ms: 3000,
            starting_resources: Resources::new(10, 10, 10),
            replenish: 2,
        }
    }
}

impl ScenarioConfig {
    #[must_use]
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    #[must_use]
    pub fn with_time_per_scenario(mut self, secs: u32) -> Self {
        self.time_per_scenario_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.scenarios.is_empty() {
            return Err(GameError::config("at least one scenario is required"));
        }
        if let Some(s) = self.scenarios.iter().find(|s| s.options.is_empty()) {
            return Err(GameError::config(format!("scenario {} has no options", s.id)));
        }
        if self.time_per_scenario_secs == 0 {
            return Err(GameError::config("time_per_scenario_secs must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioPhase {
    Waiting,
    Choosing,
    Feedback,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioAction {
    /// Pick the option at this index.
    Choose(usize),
}

/// Household situations answered under a per-scenario countdown.
#[derive(Clone, Debug)]
pub struct ScenarioGame {
    config: ScenarioConfig,
    phase: ScenarioPhase,
    current: usize,
    resources: Resources,
    handled: u32,
    selected: Option<usize>,
}

impl Default for ScenarioGame {
    fn default() -> Self {
        Self::with_config(ScenarioConfig::default())
    }
}

impl ScenarioGame {
    pub fn new(config: ScenarioConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: ScenarioConfig) -> Self {
        let resources = config.starting_resources;
        Self {
            config,
            phase: ScenarioPhase::Waiting,
            current: 0,
            resources,
            handled: 0,
            selected: None,
        }
    }

    #[must_use]
    pub fn current_scenario(&self) -> Option<&Scenario> {
        match self.phase {
            ScenarioPhase::Choosing | ScenarioPhase::Feedback => self.config.scenarios.get(self.current),
            ScenarioPhase::Waiting | ScenarioPhase::Finished => None,
        }
    }

    #[must_use]
    pub fn resources(&self) -> Resources {
        self.resources
    }

    #[must_use]
    pub fn handled(&self) -> u32 {
        self.handled
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

impl GameRules for ScenarioGame {
    type Phase = ScenarioPhase;
    type Action = ScenarioAction;
    type Config = ScenarioConfig;
    type Timer = Infallible;

    fn kind(&self) -> GameKind {
        GameKind::ScenarioChoice
    }

    fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn phase(&self) -> ScenarioPhase {
        self.phase
    }

    fn setup(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.current = 0;
        self.resources = self.config.starting_resources;
        self.handled = 0;
        self.selected = None;
        self.phase = ScenarioPhase::Choosing;

        ctx.session.time_remaining = Some(self.config.time_per_scenario_secs);
        ctx.session.round_index = 0;
    }

    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, Infallible>,
        action: ScenarioAction,
    ) -> Result<(), GameError> {
        let ScenarioAction::Choose(index) = action;
        if self.phase != ScenarioPhase::Choosing {
            return Err(GameError::InputBlocked);
        }
        let scenario = self
            .config
            .scenarios
            .get(self.current)
            .ok_or(GameError::InputBlocked)?;
        let option = scenario.options.get(index).ok_or(GameError::InvalidChoice {
            index,
            len: scenario.options.len(),
        })?;

        ctx.session.add_points(option.points);
        ctx.notice(option.feedback.clone());
        self.resources = self.resources.after_use(scenario.cost, self.config.replenish);
        self.handled += 1;
        self.selected = Some(index);
        self.phase = ScenarioPhase::Feedback;
        ctx.open_feedback(Duration::from_millis(self.config.feedback_ms));
        Ok(())
    }

    fn on_feedback_closed(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.selected = None;
        if self.current + 1 >= self.config.scenarios.len() {
            self.phase = ScenarioPhase::Finished;
            ctx.end(EndReason::Completed);
            return;
        }
        self.current += 1;
        self.phase = ScenarioPhase::Choosing;
        ctx.session.round_index = self.current as u32;
        ctx.session.time_remaining = Some(self.config.time_per_scenario_secs);
    }

    fn finish(&mut self, _ctx: &mut RulesContext<'_, Infallible>) -> u32 {
        self.phase = ScenarioPhase::Finished;
        0
    }

    fn summary(&self, _session: &GameSession) -> String {
        format!(
            "{} of {} scenarios handled",
            self.handled,
            self.config.scenarios.len()
        )
    }
}
