//! Patients and their prescriptions.

use serde::{Deserialize, Serialize};

/// Patient health ceiling.
pub const HEALTH_MAX: u32 = 100;

/// Missed doses never push patient health below this.
pub const HEALTH_FLOOR: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Importance {
    Critical,
    Important,
    Moderate,
}

impl Importance {
    /// Points for an on-time dose.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Importance::Critical => 15,
            Importance::Important => 10,
            Importance::Moderate => 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    /// Hours between doses.
    pub frequency_hours: u32,
    /// Hour of the first dose.
    pub first_dose_hour: u32,
    pub importance: Importance,
}

impl Medicine {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency_hours: u32,
        first_dose_hour: u32,
        importance: Importance,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency_hours,
            first_dose_hour,
            importance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub health: u32,
    pub medicines: Vec<Medicine>,
}

impl Patient {
    /// Raise health after a dose, capped at [`HEALTH_MAX`].
    pub fn improve(&mut self, by: u32) {
        self.health = self.health.saturating_add(by).min(HEALTH_MAX);
    }

    /// Lower health after a missed dose, floored at [`HEALTH_FLOOR`].
    pub fn worsen(&mut self, by: u32) {
        self.health = self.health.saturating_sub(by).max(HEALTH_FLOOR);
    }
}

/// The four patients of the built-in ward.
#[must_use]
pub fn builtin_patients() -> Vec<Patient> {
    use Importance::{Critical, Important, Moderate};

    vec![
        Patient {
            id: 1,
            name: "Sunita Devi".to_string(),
            age: 45,
            condition: "Diabetes".to_string(),
            health: 75,
            medicines: vec![
                Medicine::new("Metformin", "500mg", 12, 0, Critical),
                Medicine::new("Vitamin B12", "1 tablet", 24, 8, Moderate),
            ],
        },
        Patient {
            id: 2,
            name: "Ram Prasad".to_string(),
            age: 60,
            condition: "High blood pressure".to_string(),
            health: 65,
            medicines: vec![
                Medicine::new("Enalapril", "5mg", 24, 0, Critical),
                Medicine::new("Calcium", "500mg", 12, 6, Moderate),
            ],
        },
        Patient {
            id: 3,
            name: "Geeta Ben".to_string(),
            age: 35,
            condition: "TB treatment".to_string(),
            health: 55,
            medicines: vec![
                Medicine::new("Rifampicin", "450mg", 24, 0, Critical),
                Medicine::new("Isoniazid", "300mg", 24, 0, Critical),
                Medicine::new("Multivitamin", "1 tablet", 24, 12, Moderate),
            ],
        },
        Patient {
            id: 4,
            name: "Mohan Ji".to_string(),
            age: 70,
            condition: "Heart disease".to_string(),
            health: 50,
            medicines: vec![
                Medicine::new("Aspirin", "75mg", 24, 0, Important),
                Medicine::new("Atorvastatin", "20mg", 24, 18, Important),
            ],
        },
    ]
}
