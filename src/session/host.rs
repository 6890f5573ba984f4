//! Host contract: where finished sessions go.

use super::outcome::Outcome;

/// The embedding application.
///
/// The engine calls `on_complete` exactly once per finished session and
/// `on_close` when the instance is discarded. Hosts never see mid-game state
/// through this trait.
pub trait GameHost {
    /// A session finished. `outcome.score` and `outcome.duration_secs` are
    /// the values to persist.
    fn on_complete(&mut self, outcome: &Outcome);

    /// The instance was closed. No score is reported for it.
    fn on_close(&mut self) {}
}

impl<H: GameHost + ?Sized> GameHost for &mut H {
    fn on_complete(&mut self, outcome: &Outcome) {
        (**self).on_complete(outcome);
    }

    fn on_close(&mut self) {
        (**self).on_close();
    }
}

impl<H: GameHost + ?Sized> GameHost for Box<H> {
    fn on_complete(&mut self, outcome: &Outcome) {
        (**self).on_complete(outcome);
    }

    fn on_close(&mut self) {
        (**self).on_close();
    }
}

/// Host that remembers every callback. Handy for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub outcomes: Vec<Outcome>,
    pub closes: u32,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent outcome, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Outcome> {
        self.outcomes.last()
    }
}

impl GameHost for RecordingHost {
    fn on_complete(&mut self, outcome: &Outcome) {
        self.outcomes.push(outcome.clone());
    }

    fn on_close(&mut self) {
        self.closes += 1;
    }
}
