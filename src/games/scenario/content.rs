//! Scenario content: situations, answer options and household resources.

use serde::{Deserialize, Serialize};

/// Household stock of water, soap and medicine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub water: u32,
    pub soap: u32,
    pub medicine: u32,
}

impl Resources {
    #[must_use]
    pub const fn new(water: u32, soap: u32, medicine: u32) -> Self {
        Self {
            water,
            soap,
            medicine,
        }
    }

    /// Stock after paying `cost` and receiving `replenish` of each, floored at 0.
    #[must_use]
    pub fn after_use(self, cost: Resources, replenish: u32) -> Self {
        let step = |have: u32, spend: u32| have.saturating_add(replenish).saturating_sub(spend);
        Self {
            water: step(self.water, cost.water),
            soap: step(self.soap, cost.soap),
            medicine: step(self.medicine, cost.medicine),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub text: String,
    pub points: u32,
    pub feedback: String,
}

impl ScenarioOption {
    pub fn new(text: impl Into<String>, points: u32, feedback: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            points,
            feedback: feedback.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub options: Vec<ScenarioOption>,
    /// Resources the situation consumes whatever the choice.
    pub cost: Resources,
}

/// The three built-in water and sanitation situations.
#[must_use]
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: 1,
            title: "Water shortage".to_string(),
            description: "The household water supply is low. How should a family of five use it?"
                .to_string(),
            options: vec![
                ScenarioOption::new(
                    "Share it equally across all chores",
                    5,
                    "Good! Balanced use matters.",
                ),
                ScenarioOption::new(
                    "Secure drinking water first",
                    10,
                    "Excellent! Drinking water comes first.",
                ),
                ScenarioOption::new(
                    "Buy water from outside",
                    3,
                    "Okay, but household resources are better.",
                ),
            ],
            cost: Resources::new(3, 5, 5),
        },
        Scenario {
            id: 2,
            title: "Sanitation problem".to_string(),
            description: "Children in the house have diarrhoea. What should be done right away?"
                .to_string(),
            options: vec![
                ScenarioOption::new("Prepare and give ORS", 10, "Right! ORS prevents dehydration."),
                ScenarioOption::new("Tell them to drink water", 5, "Good, but ORS is better."),
                ScenarioOption::new(
                    "Wait for the doctor",
                    2,
                    "That may be too late. Treat immediately.",
                ),
            ],
            cost: Resources::new(4, 3, 8),
        },
        Scenario {
            id: 3,
            title: "Hand washing habit".to_string(),
            description: "Family members do not wash hands before eating. What should be done?"
                .to_string(),
            options: vec![
                ScenarioOption::new(
                    "Explain to everyone and keep soap at hand",
                    10,
                    "Outstanding! Teaching and access both matter.",
                ),
                ScenarioOption::new(
                    "Tell only the children",
                    5,
                    "A good start, but everyone should do it.",
                ),
                ScenarioOption::new(
                    "Remind them when you remember",
                    2,
                    "A regular habit works better.",
                ),
            ],
            cost: Resources::new(6, 9, 2),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_use_floors_at_zero() {
        let stock = Resources::new(10, 2, 10);
        let next = stock.after_use(Resources::new(3, 9, 8), 2);
        assert_eq!(next, Resources::new(9, 0, 4));
    }

    #[test]
    fn test_after_use_saturates_replenish() {
        let stock = Resources::new(10, 0, u32::MAX);
        let next = stock.after_use(Resources::new(1, 0, 0), u32::MAX);
        assert_eq!(next, Resources::new(u32::MAX - 1, u32::MAX, u32::MAX));
    }

    #[test]
    fn test_builtin_scenarios_shape() {
        let scenarios = builtin_scenarios();
        assert_eq!(scenarios.len(), 3);
        for s in &scenarios {
            assert_eq!(s.options.len(), 3);
            assert!(s.options.iter().any(|o| o.points == 10));
        }
    }
}
