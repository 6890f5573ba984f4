//! Core building blocks shared by every game: randomness, time, timers,
//! content generation and errors.
//!
//! Nothing here knows about a particular game.

pub mod clock;
pub mod error;
pub mod generate;
pub mod rng;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::GameError;
pub use generate::generate_valid;
pub use rng::GameRng;
pub use scheduler::{Scheduler, TimerHandle};
