//! Arithmetic quiz.
//!
//! - 10 questions, 30 seconds for the whole quiz
//! - Four options per question, exactly one correct
//! - +10 points per correct answer, no penalty for wrong ones
//! - 1-second feedback window after each answer pauses the clock

mod game;
mod question;

pub use game::{MathAction, MathConfig, MathGame, MathPhase};
pub use question::{generate_options, generate_question, Operation, Question, OPTION_COUNT};
