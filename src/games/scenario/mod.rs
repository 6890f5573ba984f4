//! Scenario choice ("Panadar").
//!
//! Three household water and sanitation situations, 45 seconds each. Every
//! option carries a fixed, non-negative point value. A 3-second feedback
//! window after each choice pauses the countdown.

mod content;
mod game;

pub use content::{builtin_scenarios, Resources, Scenario, ScenarioOption};
pub use game::{ScenarioAction, ScenarioConfig, ScenarioGame, ScenarioPhase};
