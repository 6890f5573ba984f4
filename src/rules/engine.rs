//! Rules trait for game implementations.
//!
//! Games implement `GameRules` to define:
//! - How a session is set up (content generation, countdown length)
//! - How a player action changes score and content
//! - What happens on countdown ticks, feedback-window ends and own timers
//! - The end-of-game bonus and the summary line
//!
//! Rules never touch the scheduler or the host. They read and write the
//! shared [`GameSession`] and leave requests (feedback windows, timers,
//! notices, end of game) on the [`RulesContext`]; the engine carries them out
//! after the callback returns.

use std::fmt::Debug;
use std::time::Duration;

use crate::catalog::GameKind;
use crate::core::{GameError, GameRng};
use crate::session::{EndReason, GameSession};

/// Something the rules asked the engine to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request<T> {
    /// Feedback text for the player.
    Notice(String),
    /// Block input and pause the countdown for this long.
    Feedback(Duration),
    /// Call `on_timer` with this token after the delay.
    After(Duration, T),
    /// Finalize the session.
    End(EndReason),
}

/// Mutable view handed to every rules callback.
pub struct RulesContext<'a, T> {
    pub session: &'a mut GameSession,
    pub rng: &'a mut GameRng,
    requests: Vec<Request<T>>,
}

impl<'a, T> RulesContext<'a, T> {
    pub fn new(session: &'a mut GameSession, rng: &'a mut GameRng) -> Self {
        Self {
            session,
            rng,
            requests: Vec::new(),
        }
    }

    /// Queue feedback text.
    pub fn notice(&mut self, message: impl Into<String>) {
        self.requests.push(Request::Notice(message.into()));
    }

    /// Open a non-interruptible feedback window.
    pub fn open_feedback(&mut self, window: Duration) {
        self.requests.push(Request::Feedback(window));
    }

    /// Schedule a rules timer.
    pub fn after(&mut self, delay: Duration, timer: T) {
        self.requests.push(Request::After(delay, timer));
    }

    /// Ask the engine to finalize the session.
    pub fn end(&mut self, reason: EndReason) {
        self.requests.push(Request::End(reason));
    }

    /// Hand the queued requests to the engine.
    #[must_use]
    pub fn into_requests(self) -> Vec<Request<T>> {
        self.requests
    }
}

/// Game rules.
///
/// ## Implementation Notes
///
/// - `setup`: regenerate all content and set `session.time_remaining`
/// - `apply`: return `Err` without mutating anything to reject an action
/// - `finish`: may still adjust the running score; returns the bonus
pub trait GameRules {
    /// Internal phase, exposed for display.
    type Phase: Copy + Debug + PartialEq;

    /// Player action payload.
    type Action: Debug;

    /// Static configuration.
    type Config: Clone + Debug;

    /// Token for rules-scheduled timers. Games without any use `Infallible`.
    type Timer: Copy + Debug;

    /// Which game this is.
    fn kind(&self) -> GameKind;

    /// Get the game configuration.
    fn config(&self) -> &Self::Config;

    /// Current internal phase.
    fn phase(&self) -> Self::Phase;

    /// Reset and generate content for a new session.
    fn setup(&mut self, ctx: &mut RulesContext<'_, Self::Timer>);

    /// Apply a player action.
    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, Self::Timer>,
        action: Self::Action,
    ) -> Result<(), GameError>;

    /// A countdown second elapsed and time is left.
    fn on_tick(&mut self, _ctx: &mut RulesContext<'_, Self::Timer>) {}

    /// The feedback window opened by the last action has closed.
    fn on_feedback_closed(&mut self, _ctx: &mut RulesContext<'_, Self::Timer>) {}

    /// A timer scheduled with [`RulesContext::after`] fired.
    fn on_timer(&mut self, _ctx: &mut RulesContext<'_, Self::Timer>, _timer: Self::Timer) {}

    /// The session is ending. Returns the end-of-game bonus.
    fn finish(&mut self, _ctx: &mut RulesContext<'_, Self::Timer>) -> u32 {
        0
    }

    /// End-screen line for the finished session.
    fn summary(&self, session: &GameSession) -> String;
}
