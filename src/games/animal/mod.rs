//! Animal care ("Chara").
//!
//! Feed three animals in turn from a shared budget over five rounds. Each
//! feeding scores the actual improvement it caused; animals decay between
//! rounds and well-kept animals earn an end-of-game bonus.

mod game;
mod herd;

pub use game::{AnimalAction, AnimalConfig, AnimalGame, AnimalPhase};
pub use herd::{builtin_feeds, Animal, AnimalKind, Feed, ATTRIBUTE_MAX, DECAY_FLOOR};
