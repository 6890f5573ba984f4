//! Arithmetic question generation.
//!
//! A question is two operands, an operation, the answer and four options:
//! the answer exactly once plus three distinct positive distractors within
//! `±spread` of it, in uniformly shuffled order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{generate_valid, GameRng};

/// Options offered per question.
pub const OPTION_COUNT: usize = 4;

const ADDEND_MAX: u32 = 50;
const MINUEND_MIN: u32 = 10;
const MINUEND_MAX: u32 = 59;
const FACTOR_MAX: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
        }
    }

    #[must_use]
    pub fn apply(self, lhs: u32, rhs: u32) -> u32 {
        match self {
            Operation::Add => lhs.saturating_add(rhs),
            Operation::Subtract => lhs.saturating_sub(rhs),
            Operation::Multiply => lhs.saturating_mul(rhs),
        }
    }
}

/// One multiple-choice arithmetic question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub lhs: u32,
    pub rhs: u32,
    pub operation: Operation,
    pub answer: u32,
    pub options: [u32; OPTION_COUNT],
}

impl Question {
    /// Index of the correct option.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|&o| o == self.answer)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index) == Some(&self.answer)
    }

    /// "12 × 7 = ?"
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} {} {} = ?", self.lhs, self.operation.symbol(), self.rhs)
    }
}

/// Draw a random question.
///
/// Operands are chosen so the answer is always at least 1: addends in
/// `1..=50`, minuend in `10..=59` with a strictly smaller subtrahend, factors in
/// `1..=12`.
pub fn generate_question(rng: &mut GameRng, spread: u32, max_attempts: usize) -> Question {
    let operation = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
    let (lhs, rhs) = match operation {
        Operation::Add => (rng.gen_range(1..=ADDEND_MAX), rng.gen_range(1..=ADDEND_MAX)),
        Operation::Subtract => {
            let minuend = rng.gen_range(MINUEND_MIN..=MINUEND_MAX);
            (minuend, rng.gen_range(1..minuend))
        }
        Operation::Multiply => (rng.gen_range(1..=FACTOR_MAX), rng.gen_range(1..=FACTOR_MAX)),
    };
    let answer = operation.apply(lhs, rhs);

    Question {
        lhs,
        rhs,
        operation,
        answer,
        options: generate_options(rng, answer, spread, max_attempts),
    }
}

/// Build the four shuffled options for `answer`.
///
/// Each distractor is redrawn until it is positive, differs from the answer
/// and from the distractors already chosen. If a slot exhausts its attempts
/// the nearest free value above the answer is used instead, or below it when
/// the answer sits at the top of the `u32` range.
pub fn generate_options(
    rng: &mut GameRng,
    answer: u32,
    spread: u32,
    max_attempts: usize,
) -> [u32; OPTION_COUNT] {
    let spread = i64::from(spread);
    let mut options = [answer; OPTION_COUNT];

    for slot in 1..OPTION_COUNT {
        let taken = &options[..slot];
        let drawn = generate_valid(
            rng,
            max_attempts,
            |rng| i64::from(answer) + rng.gen_range(-spread..=spread),
            |&candidate| {
                u32::try_from(candidate).is_ok_and(|v| v > 0 && !taken.contains(&v))
            },
        );

        let value = match drawn.and_then(|v| u32::try_from(v).ok()) {
            Some(value) => value,
            None => {
                debug!(answer, slot, "distractor attempts exhausted, using fallback");
                let reach = OPTION_COUNT as u32;
                (1..=reach)
                    .filter_map(|k| answer.checked_add(k))
                    .chain((1..=reach).filter_map(|k| answer.checked_sub(k)))
                    .find(|&v| v > 0 && !taken.contains(&v))
                    .unwrap_or(answer)
            }
        };
        options[slot] = value;
    }

    rng.shuffle(&mut options);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid_options(answer: u32, options: &[u32; OPTION_COUNT], spread: u32) {
        assert_eq!(options.iter().filter(|&&o| o == answer).count(), 1);
        for (i, a) in options.iter().enumerate() {
            assert!(*a > 0);
            assert!(a.abs_diff(answer) <= spread);
            for b in &options[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_operation_apply() {
        assert_eq!(Operation::Add.apply(3, 4), 7);
        assert_eq!(Operation::Subtract.apply(10, 4), 6);
        assert_eq!(Operation::Multiply.apply(6, 7), 42);
        assert_eq!(Operation::Multiply.symbol(), '×');
    }

    #[test]
    fn test_operation_apply_saturates() {
        assert_eq!(Operation::Add.apply(u32::MAX, 1), u32::MAX);
        assert_eq!(Operation::Subtract.apply(1, 2), 0);
        assert_eq!(Operation::Multiply.apply(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn test_generated_questions_are_consistent() {
        let mut rng = GameRng::new(11);
        for _ in 0..500 {
            let q = generate_question(&mut rng, 10, 64);
            assert_eq!(q.answer, q.operation.apply(q.lhs, q.rhs));
            assert!(q.answer >= 1);
            assert_valid_options(q.answer, &q.options, 10);
            assert!(q.is_correct(q.correct_index()));
        }
    }

    #[test]
    fn test_small_answer_still_gets_positive_options() {
        let mut rng = GameRng::new(5);
        for _ in 0..200 {
            let options = generate_options(&mut rng, 1, 10, 64);
            assert_valid_options(1, &options, 10);
        }
    }

    #[test]
    fn test_fallback_when_attempts_run_out() {
        let mut rng = GameRng::new(5);
        let options = generate_options(&mut rng, 7, 10, 0);
        let mut sorted = options;
        sorted.sort_unstable();
        assert_eq!(sorted, [7, 8, 9, 10]);
    }

    #[test]
    fn test_fallback_at_top_of_range() {
        let mut rng = GameRng::new(5);
        let options = generate_options(&mut rng, u32::MAX, 10, 0);
        let mut sorted = options;
        sorted.sort_unstable();
        assert_eq!(sorted, [u32::MAX - 3, u32::MAX - 2, u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn test_correct_position_varies() {
        let mut rng = GameRng::new(99);
        let mut seen = [false; OPTION_COUNT];
        for _ in 0..200 {
            let options = generate_options(&mut rng, 30, 10, 64);
            let idx = options.iter().position(|&o| o == 30).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_prompt() {
        let q = Question {
            lhs: 12,
            rhs: 7,
            operation: Operation::Multiply,
            answer: 84,
            options: [84, 80, 90, 77],
        };
        assert_eq!(q.prompt(), "12 × 7 = ?");
        assert_eq!(q.correct_index(), 0);
        assert!(!q.is_correct(4));
    }
}
