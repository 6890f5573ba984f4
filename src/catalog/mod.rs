//! Game catalog and player progress.
//!
//! Neither is needed to play a game. They are what a dashboard keeps around
//! the games: what exists, and how a player has done so far.

pub mod progress;
pub mod registry;

pub use progress::{GameProgress, ProgressBook};
pub use registry::{Category, Difficulty, GameCatalog, GameDescriptor, GameKind};
