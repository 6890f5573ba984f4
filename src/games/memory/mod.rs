//! Pattern memory ("Muldwarka").
//!
//! - 3×3 grid, 8 levels, sequence length `min(level + 2, 10)`
//! - Cells are revealed one per second, then input opens after 500 ms
//! - Completing level L scores `10 × L`; the first wrong press ends the game

mod game;

pub use game::{
    generate_sequence, MemoryAction, MemoryConfig, MemoryGame, MemoryPhase, MemoryTimer, Sequence,
};
