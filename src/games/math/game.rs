//! Arithmetic quiz rules.

use std::convert::Infallible;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::question::{generate_question, Question, OPTION_COUNT};
use crate::catalog::GameKind;
use crate::core::GameError;
use crate::rules::{GameRules, RulesContext};
use crate::session::{EndReason, GameSession};

/// Quiz configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathConfig {
    /// Questions per session.
    pub question_count: usize,
    /// Countdown for the whole quiz, in seconds.
    pub time_limit_secs: u32,
    pub points_per_correct: u32,
    /// Feedback window after each answer, in milliseconds.
    pub feedback_ms: u64,
    /// Distractors stay within `answer ± distractor_spread`.
    pub distractor_spread: u32,
    /// Redraws per distractor before falling back.
    pub max_attempts: usize,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            question_count: 10,
            time_limit_secs: 30,
            points_per_correct: 10,
            feedback_ms: 1000,
            distractor_spread: 10,
            max_attempts: 64,
        }
    }
}

impl MathConfig {
    #[must_use]
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    #[must_use]
    pub fn with_feedback_ms(mut self, ms: u64) -> Self {
        self.feedback_ms = ms;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.question_count == 0 {
            return Err(GameError::config("question_count must be at least 1"));
        }
        if self.time_limit_secs == 0 {
            return Err(GameError::config("time_limit_secs must be at least 1"));
        }
        // Three distinct distractors need at least three values above the answer.
        if self.distractor_spread < (OPTION_COUNT - 1) as u32 {
            return Err(GameError::config("distractor_spread must be at least 3"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathPhase {
    Waiting,
    Answering,
    Feedback,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathAction {
    /// Pick the option at this index.
    Answer(usize),
}

/// Ten timed multiple-choice arithmetic questions.
#[derive(Clone, Debug)]
pub struct MathGame {
    config: MathConfig,
    phase: MathPhase,
    questions: Vec<Question>,
    current: usize,
    correct: u32,
    selected: Option<usize>,
}

impl Default for MathGame {
    fn default() -> Self {
        Self::with_config(MathConfig::default())
    }
}

impl MathGame {
    pub fn new(config: MathConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: MathConfig) -> Self {
        Self {
            config,
            phase: MathPhase::Waiting,
            questions: Vec::new(),
            current: 0,
            correct: 0,
            selected: None,
        }
    }

    /// Question being answered, `None` once the quiz is over.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            MathPhase::Answering | MathPhase::Feedback => self.questions.get(self.current),
            MathPhase::Waiting | MathPhase::Finished => None,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// One-based number of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Option chosen for the current question, shown during feedback.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

impl GameRules for MathGame {
    type Phase = MathPhase;
    type Action = MathAction;
    type Config = MathConfig;
    type Timer = Infallible;

    fn kind(&self) -> GameKind {
        GameKind::Math
    }

    fn config(&self) -> &MathConfig {
        &self.config
    }

    fn phase(&self) -> MathPhase {
        self.phase
    }

    fn setup(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        let spread = self.config.distractor_spread;
        let attempts = self.config.max_attempts;
        self.questions = (0..self.config.question_count)
            .map(|_| generate_question(ctx.rng, spread, attempts))
            .collect();
        self.current = 0;
        self.correct = 0;
        self.selected = None;
        self.phase = MathPhase::Answering;

        ctx.session.time_remaining = Some(self.config.time_limit_secs);
        ctx.session.round_index = 0;
    }

    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, Infallible>,
        action: MathAction,
    ) -> Result<(), GameError> {
        let MathAction::Answer(index) = action;
        if self.phase != MathPhase::Answering {
            return Err(GameError::InputBlocked);
        }
        let question = self.questions.get(self.current).ok_or(GameError::InputBlocked)?;
        if index >= OPTION_COUNT {
            return Err(GameError::InvalidChoice {
                index,
                len: OPTION_COUNT,
            });
        }

        if question.is_correct(index) {
            let points = self.config.points_per_correct;
            ctx.session.add_points(points);
            self.correct += 1;
            ctx.notice(format!("Correct! +{points}"));
        } else {
            ctx.notice(format!("Wrong. The answer was {}", question.answer));
        }

        self.selected = Some(index);
        self.phase = MathPhase::Feedback;
        ctx.open_feedback(Duration::from_millis(self.config.feedback_ms));
        Ok(())
    }

    fn on_feedback_closed(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.selected = None;
        if self.current + 1 >= self.questions.len() {
            self.phase = MathPhase::Finished;
            ctx.end(EndReason::Completed);
            return;
        }
        self.current += 1;
        ctx.session.round_index = self.current as u32;
        self.phase = MathPhase::Answering;
    }

    fn finish(&mut self, _ctx: &mut RulesContext<'_, Infallible>) -> u32 {
        self.phase = MathPhase::Finished;
        self.selected = None;
        0
    }

    fn summary(&self, _session: &GameSession) -> String {
        format!("{} out of {} correct", self.correct, self.questions.len())
    }
}
