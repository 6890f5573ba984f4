//! # village-games
//!
//! The mini-game engine of a village health worker dashboard: an arithmetic
//! quiz, a pattern memory game, household scenarios, an animal care loop and
//! a medicine schedule simulation.
//!
//! ## Design Principles
//!
//! 1. **One Lifecycle**: Every game runs inside the same `GameEngine`, with
//!    the same `NotStarted → Running → Ended` state machine and the same
//!    exactly-once completion report.
//!
//! 2. **Rules Are Plain Data**: Games implement `GameRules` and never touch
//!    timers or the host directly. They leave requests on a `RulesContext`.
//!
//! 3. **Deterministic Time**: Timers live in a virtual-time `Scheduler`
//!    driven by a `Clock`. Tests use `ManualClock` and a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: RNG, clocks, scheduler, content generation helpers, errors
//! - `session`: Session state, outcomes, the `GameHost` contract
//! - `rules`: `GameRules` trait for game implementations
//! - `engine`: `GameEngine`, the lifecycle and timer driver
//! - `catalog`: Game registry and per-game player progress
//! - `games`: The five built-in rule sets

pub mod catalog;
pub mod core;
pub mod engine;
pub mod games;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Clock, GameError, GameRng, ManualClock, Scheduler, SystemClock, TimerHandle};

pub use crate::session::{EndReason, GameHost, GameSession, Lifecycle, Outcome, RecordingHost};

pub use crate::rules::{GameRules, Request, RulesContext};

pub use crate::engine::{GameEngine, TICK};

pub use crate::catalog::{
    Category, Difficulty, GameCatalog, GameDescriptor, GameKind, GameProgress, ProgressBook,
};

pub use crate::games::{
    AnimalAction, AnimalConfig, AnimalGame,
    MathAction, MathConfig, MathGame,
    MedicineAction, MedicineConfig, MedicineGame,
    MemoryAction, MemoryConfig, MemoryGame,
    ScenarioAction, ScenarioConfig, ScenarioGame,
};
