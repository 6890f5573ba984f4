//! The five built-in games.
//!
//! Each module provides a `GameRules` implementation together with its
//! config, phase and action types. Content generators are exposed as free
//! functions so they can be tested without an engine.

pub mod animal;
pub mod math;
pub mod medicine;
pub mod memory;
pub mod scenario;

pub use animal::{AnimalAction, AnimalConfig, AnimalGame};
pub use math::{MathAction, MathConfig, MathGame};
pub use medicine::{MedicineAction, MedicineConfig, MedicineGame};
pub use memory::{MemoryAction, MemoryConfig, MemoryGame};
pub use scenario::{ScenarioAction, ScenarioConfig, ScenarioGame};
