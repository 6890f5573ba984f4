//! Game descriptors and the catalog registry.
//!
//! The catalog is what a dashboard lists on its games page: one descriptor
//! per game with display text, category and difficulty. It has no effect on
//! gameplay.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::GameError;

/// The five built-in games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKind {
    /// Arithmetic quiz.
    Math,
    /// Pattern memory ("Muldwarka").
    PatternMemory,
    /// Water and sanitation scenarios ("Panadar").
    ScenarioChoice,
    /// Livestock feeding ("Chara").
    AnimalCare,
    /// Medicine schedule ("Damli").
    MedicineSchedule,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Math,
        GameKind::PatternMemory,
        GameKind::ScenarioChoice,
        GameKind::AnimalCare,
        GameKind::MedicineSchedule,
    ];

    /// Stable short name used by storage and URLs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            GameKind::Math => "math",
            GameKind::PatternMemory => "muldwarka",
            GameKind::ScenarioChoice => "panadar",
            GameKind::AnimalCare => "chara",
            GameKind::MedicineSchedule => "damli",
        }
    }

    /// Parse a slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Educational,
    Health,
    Cultural,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Catalog entry for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDescriptor {
    pub kind: GameKind,
    pub display_name: String,
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub instructions: String,
    /// Inactive games stay in the catalog but are hidden from players.
    pub active: bool,
}

impl GameDescriptor {
    /// Create an active beginner-level descriptor.
    pub fn new(kind: GameKind, display_name: impl Into<String>, category: Category) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            description: String::new(),
            category,
            difficulty: Difficulty::default(),
            instructions: String::new(),
            active: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Registry of game descriptors.
///
/// ## Example
///
/// ```
/// use village_games::catalog::{Category, GameCatalog, GameDescriptor, GameKind};
///
/// let mut catalog = GameCatalog::new();
/// catalog
///     .register(GameDescriptor::new(GameKind::Math, "Math Game", Category::Educational))
///     .unwrap();
///
/// assert_eq!(catalog.get(GameKind::Math).unwrap().display_name, "Math Game");
/// assert!(catalog.register(GameDescriptor::new(GameKind::Math, "Again", Category::Health)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameCatalog {
    games: FxHashMap<GameKind, GameDescriptor>,
}

impl GameCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the five built-in games.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            GameDescriptor::new(GameKind::Math, "Math Game", Category::Educational)
                .with_description("Practice the basic arithmetic used in health records.")
                .with_instructions("Answer 10 questions in 30 seconds. Each correct answer is worth 10 points."),
            GameDescriptor::new(GameKind::PatternMemory, "Muldwarka", Category::Cultural)
                .with_description("Remember numbers and patterns. A memory training game.")
                .with_instructions("Watch the highlighted cells, then press them in the same order.")
                .with_difficulty(Difficulty::Intermediate),
            GameDescriptor::new(GameKind::ScenarioChoice, "Panadar", Category::Health)
                .with_description("Water and resource management.")
                .with_instructions("Pick the best response to each household situation within 45 seconds."),
            GameDescriptor::new(GameKind::AnimalCare, "Chara", Category::Health)
                .with_description("Keep the village livestock healthy on a budget.")
                .with_instructions("Feed each animal in turn. Healthy, well-fed, happy animals earn a bonus.")
                .with_difficulty(Difficulty::Intermediate),
            GameDescriptor::new(GameKind::MedicineSchedule, "Damli", Category::Health)
                .with_description("Give patients their medicines on time over two simulated days.")
                .with_instructions("Administer each due dose in its hour. Missing critical doses costs points.")
                .with_difficulty(Difficulty::Advanced),
        ];

        let mut catalog = Self::new();
        for entry in entries {
            catalog.games.insert(entry.kind, entry);
        }
        catalog
    }

    /// Register a descriptor. Fails if the kind is already present.
    pub fn register(&mut self, descriptor: GameDescriptor) -> Result<(), GameError> {
        if self.games.contains_key(&descriptor.kind) {
            return Err(GameError::DuplicateGame(descriptor.kind));
        }
        self.games.insert(descriptor.kind, descriptor);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, kind: GameKind) -> Option<&GameDescriptor> {
        self.games.get(&kind)
    }

    /// Look up by slug.
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&GameDescriptor> {
        GameKind::from_slug(slug).and_then(|kind| self.get(kind))
    }

    /// Turn a game on or off. Returns false if the kind is not registered.
    pub fn set_active(&mut self, kind: GameKind, active: bool) -> bool {
        match self.games.get_mut(&kind) {
            Some(entry) => {
                entry.active = active;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Active games in `GameKind` order.
    pub fn active(&self) -> Vec<&GameDescriptor> {
        let mut list: Vec<_> = self.games.values().filter(|g| g.active).collect();
        list.sort_by_key(|g| g.kind);
        list
    }

    /// Games in a category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &GameDescriptor> {
        self.games.values().filter(move |g| g.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(GameKind::from_slug("chess"), None);
        assert_eq!(GameKind::MedicineSchedule.to_string(), "damli");
    }

    #[test]
    fn test_builtin_has_all_games() {
        let catalog = GameCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        for kind in GameKind::ALL {
            assert!(catalog.get(kind).is_some(), "missing {kind}");
        }
        assert_eq!(catalog.get_by_slug("panadar").map(|g| g.kind), Some(GameKind::ScenarioChoice));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut catalog = GameCatalog::builtin();
        let err = catalog
            .register(GameDescriptor::new(GameKind::AnimalCare, "Chara 2", Category::Health))
            .unwrap_err();
        assert_eq!(err, GameError::DuplicateGame(GameKind::AnimalCare));
        assert_eq!(catalog.get(GameKind::AnimalCare).unwrap().display_name, "Chara");
    }

    #[test]
    fn test_inactive_games_hidden() {
        let mut catalog = GameCatalog::builtin();
        assert!(catalog.set_active(GameKind::PatternMemory, false));
        let active: Vec<_> = catalog.active().iter().map(|g| g.kind).collect();
        assert_eq!(
            active,
            vec![
                GameKind::Math,
                GameKind::ScenarioChoice,
                GameKind::AnimalCare,
                GameKind::MedicineSchedule
            ]
        );

        let mut empty = GameCatalog::new();
        assert!(!empty.set_active(GameKind::Math, true));
    }

    #[test]
    fn test_by_category() {
        let catalog = GameCatalog::builtin();
        assert_eq!(catalog.by_category(Category::Health).count(), 3);
        assert_eq!(catalog.by_category(Category::Educational).count(), 1);
    }
}
