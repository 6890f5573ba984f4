//! Dose schedule.

use serde::{Deserialize, Serialize};

use super::ward::Patient;

/// One planned dose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Index into the ward's patient list.
    pub patient: usize,
    /// Index into that patient's medicines.
    pub medicine: usize,
    pub due_hour: u32,
    completed: bool,
    penalized: bool,
}

impl ScheduleItem {
    #[must_use]
    pub fn new(patient: usize, medicine: usize, due_hour: u32) -> Self {
        Self {
            patient,
            medicine,
            due_hour,
            completed: false,
            penalized: false,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the dose given. There is no way back.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Whether a missed-dose penalty was already charged.
    #[must_use]
    pub fn is_penalized(&self) -> bool {
        self.penalized
    }

    pub(crate) fn mark_penalized(&mut self) {
        self.penalized = true;
    }

    /// Due before `hour` and never given.
    #[must_use]
    pub fn is_overdue(&self, hour: u32) -> bool {
        !self.completed && self.due_hour < hour
    }
}

/// Every dose due before `hours`, sorted by due hour with ties broken by
/// patient then medicine.
#[must_use]
pub fn build_schedule(patients: &[Patient], hours: u32) -> Vec<ScheduleItem> {
    let mut items: Vec<ScheduleItem> = patients
        .iter()
        .enumerate()
        .flat_map(|(p, patient)| {
            patient.medicines.iter().enumerate().flat_map(move |(m, medicine)| {
                (medicine.first_dose_hour..hours)
                    .step_by(medicine.frequency_hours.max(1) as usize)
                    .map(move |hour| ScheduleItem::new(p, m, hour))
            })
        })
        .collect();
    items.sort_by_key(|item| (item.due_hour, item.patient, item.medicine));
    items
}
