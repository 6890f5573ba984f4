//! Animals, feeds and their attribute arithmetic.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Upper bound of every animal attribute.
pub const ATTRIBUTE_MAX: u32 = 100;

/// Between-round decay never pushes health or happiness below this.
pub const DECAY_FLOOR: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Cow,
    Goat,
    Chicken,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Cow, AnimalKind::Goat, AnimalKind::Chicken];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimalKind::Cow => "cow",
            AnimalKind::Goat => "goat",
            AnimalKind::Chicken => "chicken",
        }
    }

    /// Starting ranges for (health, hunger, happiness).
    fn starting_ranges(self) -> [Range<u32>; 3] {
        match self {
            AnimalKind::Cow => [40..70, 30..70, 40..70],
            AnimalKind::Goat => [50..80, 40..90, 35..65],
            AnimalKind::Chicken => [30..70, 40..100, 30..70],
        }
    }
}

/// One animal. Lower hunger is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub kind: AnimalKind,
    pub health: u32,
    pub hunger: u32,
    pub happiness: u32,
}

impl Animal {
    /// Fresh animal with randomized attributes.
    pub fn spawn(kind: AnimalKind, rng: &mut GameRng) -> Self {
        let [health, hunger, happiness] = kind.starting_ranges();
        Self {
            kind,
            health: rng.gen_range(health),
            hunger: rng.gen_range(hunger),
            happiness: rng.gen_range(happiness),
        }
    }

    /// Apply a feed and return the summed improvement. Negative when the feed
    /// made the animal worse off overall.
    pub fn feed(&mut self, feed: &Feed) -> i32 {
        let health = shift(self.health, feed.health_boost);
        let hunger = self.hunger.saturating_sub(feed.hunger_reduction);
        let happiness = shift(self.happiness, feed.happiness_boost);

        let improvement = (health as i32 - self.health as i32)
            + (self.hunger as i32 - hunger as i32)
            + (happiness as i32 - self.happiness as i32);

        self.health = health;
        self.hunger = hunger;
        self.happiness = happiness;
        improvement
    }

    /// Time passing between rounds.
    pub fn decay(&mut self, rng: &mut GameRng) {
        let health_loss = rng.gen_range(0..15u32) + 5;
        let hunger_gain = rng.gen_range(0..20u32) + 10;
        let happiness_loss = rng.gen_range(0..10u32) + 5;

        self.health = self.health.saturating_sub(health_loss).max(DECAY_FLOOR);
        self.hunger = (self.hunger + hunger_gain).min(ATTRIBUTE_MAX);
        self.happiness = self.happiness.saturating_sub(happiness_loss).max(DECAY_FLOOR);
    }

    /// End-of-game bonus for a well-kept animal.
    #[must_use]
    pub fn wellbeing_bonus(&self) -> u32 {
        self.health.saturating_sub(50) + 50u32.saturating_sub(self.hunger) + self.happiness.saturating_sub(50)
    }
}

fn shift(value: u32, delta: i32) -> u32 {
    let shifted = (i64::from(value) + i64::from(delta)).clamp(0, i64::from(ATTRIBUTE_MAX));
    u32::try_from(shifted).unwrap_or(ATTRIBUTE_MAX)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub name: String,
    pub health_boost: i32,
    pub hunger_reduction: u32,
    pub happiness_boost: i32,
    pub cost: u32,
}

impl Feed {
    pub fn new(
        name: impl Into<String>,
        health_boost: i32,
        hunger_reduction: u32,
        happiness_boost: i32,
        cost: u32,
    ) -> Self {
        Self {
            name: name.into(),
            health_boost,
            hunger_reduction,
            happiness_boost,
            cost,
        }
    }
}

#[must_use]
pub fn builtin_feeds() -> Vec<Feed> {
    vec![
        Feed::new("Green fodder", 10, 15, 5, 2),
        Feed::new("Grain mix", 5, 20, 3, 3),
        Feed::new("Water", 2, 5, 8, 1),
        Feed::new("Medicine", 25, 0, -2, 5),
        Feed::new("Special feed", 15, 25, 10, 6),
    ]
}
