//! Generic engine shared by all games: lifecycle, countdown, feedback
//! windows, rules timers and the finalizer.

mod driver;

pub use driver::{GameEngine, TICK};
