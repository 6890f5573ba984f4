//! Retry-until-valid content generation.
//!
//! Generators are plain functions of the RNG. A candidate is drawn, checked
//! against a validity predicate, and redrawn until it passes or the attempt
//! budget runs out. Callers decide what to do on exhaustion (usually fall back
//! to a deterministic valid value), so a bad streak of randomness is never
//! visible to the player.

use super::rng::GameRng;

/// Draw candidates until one satisfies `valid`, at most `max_attempts` times.
///
/// Returns `None` when every attempt was rejected.
///
/// ```
/// use village_games::core::{generate_valid, GameRng};
///
/// let mut rng = GameRng::new(3);
/// let even = generate_valid(&mut rng, 100, |r| r.gen_range(0..10u32), |v| v % 2 == 0);
/// assert!(even.is_some_and(|v| v % 2 == 0));
/// ```
pub fn generate_valid<T, G, P>(
    rng: &mut GameRng,
    max_attempts: usize,
    mut generate: G,
    valid: P,
) -> Option<T>
where
    G: FnMut(&mut GameRng) -> T,
    P: Fn(&T) -> bool,
{
    (0..max_attempts)
        .map(|_| generate(rng))
        .find(|candidate| valid(candidate))
}
