//! Property tests for content generators and engine invariants.

use std::time::Duration;

use proptest::prelude::*;
use village_games::core::{GameError, GameRng, ManualClock};
use village_games::engine::GameEngine;
use village_games::games::animal::{builtin_feeds, Animal, AnimalKind, DECAY_FLOOR};
use village_games::games::math::{generate_options, generate_question, MathAction, MathGame};
use village_games::games::medicine::{build_schedule, Importance, Medicine, Patient};
use village_games::games::memory::{generate_sequence, MemoryConfig};
use village_games::games::scenario::{ScenarioConfig, ScenarioGame};
use village_games::session::{Lifecycle, RecordingHost};

proptest! {
    /// Options are positive, distinct and contain the answer exactly once.
    #[test]
    fn prop_math_options_valid(seed in any::<u64>(), answer in 1u32..200, spread in 3u32..15) {
        let mut rng = GameRng::new(seed);
        let options = generate_options(&mut rng, answer, spread, 64);

        prop_assert!(options.iter().all(|&o| o > 0));
        prop_assert_eq!(options.iter().filter(|&&o| o == answer).count(), 1);
        for (i, a) in options.iter().enumerate() {
            prop_assert!(!options[i + 1..].contains(a));
        }
    }

    /// Generated questions are internally consistent.
    #[test]
    fn prop_math_question_consistent(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let question = generate_question(&mut rng, 10, 64);

        prop_assert!(question.answer >= 1);
        prop_assert_eq!(question.operation.apply(question.lhs, question.rhs), question.answer);
        prop_assert_eq!(question.options[question.correct_index()], question.answer);
    }

    /// The fallback path still yields valid options with a single attempt.
    #[test]
    fn prop_math_options_fallback(seed in any::<u64>(), answer in 1u32..5) {
        let mut rng = GameRng::new(seed);
        let options = generate_options(&mut rng, answer, 3, 1);

        prop_assert!(options.iter().all(|&o| o > 0));
        prop_assert_eq!(options.iter().filter(|&&o| o == answer).count(), 1);
    }

    /// Feeding keeps every attribute in range; decay respects its floor.
    #[test]
    fn prop_animal_attributes_bounded(
        seed in any::<u64>(),
        feeds in prop::collection::vec(0usize..5, 0..40),
        decays in 0usize..6,
    ) {
        let mut rng = GameRng::new(seed);
        let catalog = builtin_feeds();
        let mut animals: Vec<Animal> = AnimalKind::ALL
            .iter()
            .map(|&kind| Animal::spawn(kind, &mut rng))
            .collect();

        for (i, feed) in feeds.iter().enumerate() {
            let animal = &mut animals[i % 3];
            let before = *animal;
            let improvement = animal.feed(&catalog[*feed]);
            let change = (animal.health as i32 - before.health as i32)
                + (before.hunger as i32 - animal.hunger as i32)
                + (animal.happiness as i32 - before.happiness as i32);
            prop_assert_eq!(improvement, change);
        }
        for animal in &animals {
            prop_assert!(animal.health <= 100 && animal.hunger <= 100 && animal.happiness <= 100);
        }

        for _ in 0..decays {
            for animal in &mut animals {
                animal.decay(&mut rng);
                prop_assert!(animal.health >= DECAY_FLOOR && animal.health <= 100);
                prop_assert!(animal.happiness >= DECAY_FLOOR && animal.happiness <= 100);
                prop_assert!(animal.hunger <= 100);
            }
        }
    }

    /// Sequence length follows `min(level + 2, 10)` and stays on the grid.
    #[test]
    fn prop_memory_sequence(seed in any::<u64>(), level in 1u32..30, grid in 1u8..16) {
        let config = MemoryConfig::default();
        let len = config.sequence_len(level);
        prop_assert_eq!(len, (level as usize + 2).min(10));

        let mut rng = GameRng::new(seed);
        let sequence = generate_sequence(&mut rng, len, grid);
        prop_assert_eq!(sequence.len(), len);
        prop_assert!(sequence.iter().all(|&c| c < grid));
    }

    /// Schedules are sorted and contain every dose before the horizon.
    #[test]
    fn prop_schedule_sorted_and_complete(
        plans in prop::collection::vec((1u32..30, 0u32..60), 1..8),
        hours in 1u32..100,
    ) {
        let patients: Vec<Patient> = plans
            .chunks(2)
            .enumerate()
            .map(|(i, chunk)| Patient {
                id: i as u32 + 1,
                name: format!("Patient {i}"),
                age: 40,
                condition: "Test".to_string(),
                health: 50,
                medicines: chunk
                    .iter()
                    .map(|&(frequency, first)| {
                        Medicine::new("Dose", "1", frequency, first, Importance::Moderate)
                    })
                    .collect(),
            })
            .collect();

        let schedule = build_schedule(&patients, hours);
        let expected: u32 = plans
            .iter()
            .map(|&(frequency, first)| {
                if first >= hours { 0 } else { (hours - first).div_ceil(frequency) }
            })
            .sum();

        prop_assert_eq!(schedule.len() as u32, expected);
        for pair in schedule.windows(2) {
            let a = (pair[0].due_hour, pair[0].patient, pair[0].medicine);
            let b = (pair[1].due_hour, pair[1].patient, pair[1].medicine);
            prop_assert!(a <= b);
        }
        prop_assert!(schedule.iter().all(|i| i.due_hour < hours && !i.is_completed()));
    }

    /// Whatever the player does and whenever, completion is reported at most
    /// once and nothing is accepted afterwards.
    #[test]
    fn prop_engine_reports_once(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u64..4000, 0usize..5), 1..60),
    ) {
        let mut engine = GameEngine::new(
            MathGame::default(),
            RecordingHost::new(),
            ManualClock::new(),
            GameRng::new(seed),
        );
        engine.start().unwrap();

        for (wait, choice) in steps {
            engine.advance(Duration::from_millis(wait));
            let before = engine.score();
            match engine.submit(MathAction::Answer(choice)) {
                Ok(()) => {
                    prop_assert!(engine.score() >= before);
                }
                Err(GameError::NotRunning(Lifecycle::Ended)) => {
                    prop_assert_eq!(engine.host().outcomes.len(), 1);
                }
                Err(_) => {
                    prop_assert_eq!(engine.score(), before);
                }
            }
            prop_assert!(engine.host().outcomes.len() <= 1);
        }

        engine.advance(Duration::from_secs(120));
        prop_assert_eq!(engine.host().outcomes.len(), 1);
        prop_assert_eq!(engine.pending_timers(), 0);
    }
}

/// Configs survive a JSON round trip, so hosts can store them.
#[test]
fn test_scenario_config_json() {
    let config = ScenarioConfig::default().with_time_per_scenario(30);
    let json = serde_json::to_string(&config).unwrap();
    let parsed: ScenarioConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    assert!(ScenarioGame::new(parsed).is_ok());
}
