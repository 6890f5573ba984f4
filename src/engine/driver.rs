//! The generic game engine.
//!
//! `GameEngine` owns one game instance: its rules, its session, its timers and
//! its host. It implements the shared lifecycle (`NotStarted → Running →
//! Ended`, `Closed` from anywhere), the 1-second countdown, feedback windows
//! that pause the countdown, and the finalizer that reports exactly once.
//!
//! ## Driving the engine
//!
//! The engine is single-threaded and never sleeps. The host calls
//! [`GameEngine::pump`] whenever it wants due timers to fire (a UI frame, a
//! `setInterval`, a test step); `submit` pumps first, so actions always see an
//! up-to-date countdown.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::{Clock, GameError, GameRng, ManualClock, Scheduler, SystemClock, TimerHandle};
use crate::rules::{GameRules, Request, RulesContext};
use crate::session::{EndReason, GameHost, GameSession, Lifecycle, Outcome};

/// Countdown resolution.
pub const TICK: Duration = Duration::from_secs(1);

/// Timers the engine keeps in its scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineTimer<T> {
    Countdown,
    FeedbackEnd,
    Rules(T),
}

/// One running (or runnable) game instance.
pub struct GameEngine<R: GameRules, H: GameHost, C: Clock = SystemClock> {
    rules: R,
    host: H,
    clock: C,
    rng: GameRng,
    session: GameSession,
    scheduler: Scheduler<EngineTimer<R::Timer>>,
    countdown: Option<TimerHandle>,
    feedback: Option<TimerHandle>,
    notices: Vec<String>,
    last_outcome: Option<Outcome>,
    sessions_started: u64,
}

impl<R: GameRules, H: GameHost> GameEngine<R, H, SystemClock> {
    /// Engine on the wall clock with an entropy-seeded RNG.
    pub fn with_system_clock(rules: R, host: H) -> Self {
        Self::new(rules, host, SystemClock::new(), GameRng::from_entropy())
    }
}

impl<R: GameRules, H: GameHost> GameEngine<R, H, ManualClock> {
    /// Move the manual clock forward and fire whatever became due.
    pub fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
        self.pump();
    }
}

impl<R: GameRules, H: GameHost, C: Clock> GameEngine<R, H, C> {
    pub fn new(rules: R, host: H, clock: C, rng: GameRng) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(clock.now());
        Self {
            rules,
            host,
            clock,
            rng,
            session: GameSession::default(),
            scheduler,
            countdown: None,
            feedback: None,
            notices: Vec::new(),
            last_outcome: None,
            sessions_started: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to drain recorded outcomes between sessions.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the engine and return the host.
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.session.lifecycle
    }

    #[must_use]
    pub fn phase(&self) -> R::Phase {
        self.rules.phase()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.session.time_remaining
    }

    /// True while a feedback window blocks input.
    #[must_use]
    pub fn input_blocked(&self) -> bool {
        self.session.input_blocked
    }

    /// Outcome of the most recently finished session.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Number of timers still queued.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Feedback lines not yet taken by the host.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Drain queued feedback lines.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    // === Inbound operations ===

    /// Start a new session from `NotStarted` or `Ended`.
    pub fn start(&mut self) -> Result<(), GameError> {
        match self.session.lifecycle {
            Lifecycle::Running => return Err(GameError::AlreadyRunning),
            Lifecycle::Closed => return Err(GameError::Closed),
            Lifecycle::NotStarted | Lifecycle::Ended => {}
        }

        self.cancel_timers();
        self.scheduler.advance_to(self.clock.now());
        self.sessions_started += 1;
        self.session = GameSession::begin(self.sessions_started, self.scheduler.now());
        self.notices.clear();
        self.last_outcome = None;

        info!(
            game = %self.rules.kind(),
            session = self.session.id,
            seed = ?self.rng.seed(),
            "game started"
        );

        let ((), requests) = self.with_rules(|rules, ctx| rules.setup(ctx));
        self.process(requests);
        Ok(())
    }

    /// Submit a player action.
    ///
    /// Rejected actions leave the session untouched.
    pub fn submit(&mut self, action: R::Action) -> Result<(), GameError> {
        self.pump();

        if !self.session.is_running() {
            debug!(lifecycle = %self.session.lifecycle, ?action, "action ignored");
            return Err(GameError::NotRunning(self.session.lifecycle));
        }
        if self.session.input_blocked {
            debug!(?action, "action during feedback window");
            return Err(GameError::InputBlocked);
        }

        let (result, requests) = self.with_rules(|rules, ctx| rules.apply(ctx, action));
        if let Err(err) = result {
            debug!(%err, "action rejected");
            return Err(err);
        }
        self.process(requests);
        Ok(())
    }

    /// Fire every timer that is due on the engine clock, in due order.
    pub fn pump(&mut self) {
        let now = self.clock.now();
        while let Some((_, timer)) = self.scheduler.pop_due(now) {
            self.dispatch(timer);
        }
        self.scheduler.advance_to(now);
    }

    /// Discard the instance. Cancels every pending timer and never reports a
    /// score for an unfinished session.
    pub fn close(&mut self) {
        if self.session.lifecycle == Lifecycle::Closed {
            return;
        }
        let was = self.session.lifecycle;
        let dropped = self.cancel_timers();
        self.session.lifecycle = Lifecycle::Closed;
        self.session.input_blocked = false;

        info!(
            game = %self.rules.kind(),
            session = self.session.id,
            from = %was,
            dropped_timers = dropped,
            "game closed"
        );
        self.host.on_close();
    }

    // === Internals ===

    fn with_rules<F, O>(&mut self, f: F) -> (O, Vec<Request<R::Timer>>)
    where
        F: FnOnce(&mut R, &mut RulesContext<'_, R::Timer>) -> O,
    {
        let mut ctx = RulesContext::new(&mut self.session, &mut self.rng);
        let out = f(&mut self.rules, &mut ctx);
        (out, ctx.into_requests())
    }

    fn dispatch(&mut self, timer: EngineTimer<R::Timer>) {
        if !self.session.is_running() {
            warn!(?timer, lifecycle = %self.session.lifecycle, "stale timer ignored");
            return;
        }

        match timer {
            EngineTimer::Countdown => {
                self.countdown = None;
                self.tick();
            }
            EngineTimer::FeedbackEnd => {
                self.feedback = None;
                self.session.input_blocked = false;
                let ((), requests) = self.with_rules(|rules, ctx| rules.on_feedback_closed(ctx));
                self.process(requests);
            }
            EngineTimer::Rules(token) => {
                let ((), requests) = self.with_rules(|rules, ctx| rules.on_timer(ctx, token));
                self.process(requests);
            }
        }
    }

    fn tick(&mut self) {
        let Some(remaining) = self.session.time_remaining else {
            return;
        };
        let remaining = remaining.saturating_sub(1);
        self.session.time_remaining = Some(remaining);
        self.session.ticks_elapsed += 1;

        if remaining == 0 {
            self.finalize(EndReason::TimeUp);
            return;
        }

        let ((), requests) = self.with_rules(|rules, ctx| rules.on_tick(ctx));
        self.process(requests);
    }

    fn process(&mut self, requests: Vec<Request<R::Timer>>) {
        for request in requests {
            match request {
                Request::Notice(message) => self.notices.push(message),
                // Anything after an end request is moot.
                _ if !self.session.is_running() => {}
                Request::Feedback(window) => self.open_feedback(window),
                Request::After(delay, token) => {
                    self.scheduler.schedule(delay, EngineTimer::Rules(token));
                }
                Request::End(reason) => self.finalize(reason),
            }
        }
        self.resume_countdown();
    }

    fn open_feedback(&mut self, window: Duration) {
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.feedback.take() {
            self.scheduler.cancel(handle);
        }
        self.session.input_blocked = true;
        self.feedback = Some(self.scheduler.schedule(window, EngineTimer::FeedbackEnd));
    }

    fn resume_countdown(&mut self) {
        let ticking = self.session.is_running()
            && !self.session.input_blocked
            && self.session.time_remaining.is_some_and(|t| t > 0);

        if ticking && self.countdown.is_none() {
            self.countdown = Some(self.scheduler.schedule(TICK, EngineTimer::Countdown));
        }
    }

    fn cancel_timers(&mut self) -> usize {
        self.countdown = None;
        self.feedback = None;
        self.scheduler.cancel_all()
    }

    fn finalize(&mut self, reason: EndReason) {
        if !self.session.is_running() {
            return;
        }
        self.cancel_timers();
        self.session.input_blocked = false;

        let (bonus, requests) = self.with_rules(|rules, ctx| rules.finish(ctx));
        for request in requests {
            if let Request::Notice(message) = request {
                self.notices.push(message);
            }
        }
        self.session.add_points(bonus);
        self.session.lifecycle = Lifecycle::Ended;

        let outcome = Outcome {
            session_id: self.session.id,
            kind: self.rules.kind(),
            score: self.session.score,
            bonus,
            duration_secs: self.session.elapsed_secs(self.scheduler.now()),
            reason,
            level: self.session.round_index + 1,
            summary: self.rules.summary(&self.session),
        };

        info!(
            game = %outcome.kind,
            session = outcome.session_id,
            score = outcome.score,
            bonus = outcome.bonus,
            duration_secs = outcome.duration_secs,
            ?reason,
            "game finished"
        );

        self.host.on_complete(&outcome);
        self.last_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GameKind;
    use crate::session::RecordingHost;

    /// Minimal rules: 5-second countdown, `Some(p)` scores `p` and opens a
    /// 2-second feedback window, `None` ends the game.
    #[derive(Default)]
    struct Stub {
        ticks: u32,
        reveals: u32,
        closed_windows: u32,
    }

    impl GameRules for Stub {
        type Phase = ();
        type Action = Option<u32>;
        type Config = ();
        type Timer = u8;

        fn kind(&self) -> GameKind {
            GameKind::Math
        }

        fn config(&self) -> &() {
            &()
        }

        fn phase(&self) {}

        fn setup(&mut self, ctx: &mut RulesContext<'_, u8>) {
            *self = Self::default();
            ctx.session.time_remaining = Some(5);
            ctx.after(Duration::from_millis(1500), 1);
        }

        fn apply(&mut self, ctx: &mut RulesContext<'_, u8>, action: Option<u32>) -> Result<(), GameError> {
            match action {
                Some(0) => Err(GameError::InvalidChoice { index: 0, len: 0 }),
                Some(points) => {
                    ctx.session.add_points(points);
                    ctx.notice(format!("+{points}"));
                    ctx.open_feedback(Duration::from_secs(2));
                    Ok(())
                }
                None => {
                    ctx.end(EndReason::Completed);
                    Ok(())
                }
            }
        }

        fn on_tick(&mut self, _ctx: &mut RulesContext<'_, u8>) {
            self.ticks += 1;
        }

        fn on_feedback_closed(&mut self, _ctx: &mut RulesContext<'_, u8>) {
            self.closed_windows += 1;
        }

        fn on_timer(&mut self, _ctx: &mut RulesContext<'_, u8>, _timer: u8) {
            self.reveals += 1;
        }

        fn finish(&mut self, _ctx: &mut RulesContext<'_, u8>) -> u32 {
            1
        }

        fn summary(&self, session: &GameSession) -> String {
            format!("{} points", session.score)
        }
    }

    fn engine() -> (GameEngine<Stub, RecordingHost, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = GameEngine::new(Stub::default(), RecordingHost::new(), clock.clone(), GameRng::new(1));
        (engine, clock)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_countdown_ticks_every_second() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        assert_eq!(engine.time_remaining(), Some(5));

        engine.advance(Duration::from_millis(999));
        assert_eq!(engine.time_remaining(), Some(5));

        engine.advance(Duration::from_millis(1));
        assert_eq!(engine.time_remaining(), Some(4));
        assert_eq!(engine.rules().ticks, 1);
    }

    #[test]
    fn test_timeout_finalizes_once_with_bonus() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.advance(secs(10));

        assert_eq!(engine.lifecycle(), Lifecycle::Ended);
        let outcomes = &engine.host().outcomes;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].reason, EndReason::TimeUp);
        assert_eq!(outcomes[0].score, 1);
        assert_eq!(outcomes[0].duration_secs, 5);
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn test_feedback_window_pauses_countdown() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.advance(secs(1));
        assert_eq!(engine.time_remaining(), Some(4));

        engine.submit(Some(10)).unwrap();
        assert!(engine.input_blocked());
        assert_eq!(engine.submit(Some(5)), Err(GameError::InputBlocked));

        engine.advance(Duration::from_millis(1999));
        assert_eq!(engine.time_remaining(), Some(4));

        // Window closes at 2s, countdown resumes with a full second.
        engine.advance(Duration::from_millis(1));
        assert!(!engine.input_blocked());
        assert_eq!(engine.rules().closed_windows, 1);
        assert_eq!(engine.time_remaining(), Some(4));

        engine.advance(secs(1));
        assert_eq!(engine.time_remaining(), Some(3));
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        let before = engine.session().clone();

        assert!(engine.submit(Some(0)).is_err());
        assert_eq!(engine.session(), &before);
        assert!(engine.notices().is_empty());
    }

    #[test]
    fn test_rules_timer_fires() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.advance(Duration::from_millis(1500));
        assert_eq!(engine.rules().reveals, 1);
    }

    #[test]
    fn test_actions_after_end_are_ignored() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.submit(None).unwrap();
        assert_eq!(engine.lifecycle(), Lifecycle::Ended);

        assert_eq!(engine.submit(Some(3)), Err(GameError::NotRunning(Lifecycle::Ended)));
        assert_eq!(engine.submit(None), Err(GameError::NotRunning(Lifecycle::Ended)));
        assert_eq!(engine.host().outcomes.len(), 1);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_close_cancels_timers_without_reporting() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.submit(Some(4)).unwrap();
        assert!(engine.pending_timers() > 0);

        engine.close();
        assert_eq!(engine.pending_timers(), 0);
        assert_eq!(engine.lifecycle(), Lifecycle::Closed);

        engine.advance(secs(60));
        assert!(engine.host().outcomes.is_empty());
        assert_eq!(engine.host().closes, 1);
        assert_eq!(engine.rules().ticks, 0);

        engine.close();
        assert_eq!(engine.host().closes, 1);
        assert_eq!(engine.start(), Err(GameError::Closed));
    }

    #[test]
    fn test_restart_after_end_is_a_new_session() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        assert_eq!(engine.start(), Err(GameError::AlreadyRunning));
        engine.submit(Some(7)).unwrap();
        engine.advance(secs(2));
        engine.submit(None).unwrap();

        engine.start().unwrap();
        assert_eq!(engine.session().id, 2);
        assert_eq!(engine.score(), 0);
        assert!(engine.last_outcome().is_none());
        assert_eq!(engine.host().outcomes[0].score, 8);
    }

    #[test]
    fn test_notices_are_drained() {
        let (mut engine, _) = engine();
        engine.start().unwrap();
        engine.submit(Some(2)).unwrap();
        assert_eq!(engine.take_notices(), vec!["+2".to_string()]);
        assert!(engine.notices().is_empty());
    }

    #[test]
    fn test_duration_measured_from_start() {
        let (mut engine, clock) = engine();
        clock.advance(secs(100));
        engine.start().unwrap();
        engine.advance(Duration::from_millis(2700));
        engine.submit(None).unwrap();
        assert_eq!(engine.last_outcome().map(|o| o.duration_secs), Some(2));
    }
}
