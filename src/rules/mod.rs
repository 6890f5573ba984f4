//! Rules trait for game implementations.
//!
//! Games implement `GameRules` to define:
//! - Content generation for each session
//! - How actions change the score
//! - Timers, feedback windows and end conditions
//!
//! The engine calls into `GameRules` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameRules, Request, RulesContext};
