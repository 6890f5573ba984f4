//! Medicine schedule rules.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schedule::{build_schedule, ScheduleItem};
use super::ward::{builtin_patients, Importance, Patient};
use crate::catalog::GameKind;
use crate::core::GameError;
use crate::rules::{GameRules, RulesContext};
use crate::session::GameSession;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineConfig {
    pub patients: Vec<Patient>,
    /// Simulated hours, one per countdown second.
    pub hours: u32,
    /// Missed critical doses are charged every this many hours and at the end.
    pub overdue_check_hours: u32,
    pub wrong_dose_penalty: u32,
    pub missed_dose_penalty: u32,
    /// Scaled by the share of critical doses given.
    pub adherence_bonus: u32,
}

impl Default for MedicineConfig {
    fn default() -> Self {
        Self {
            patients: builtin_patients(),
            hours: 48,
            overdue_check_hours: 4,
            wrong_dose_penalty: 5,
            missed_dose_penalty: 10,
            adherence_bonus: 50,
        }
    }
}

impl MedicineConfig {
    #[must_use]
    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    #[must_use]
    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.patients.is_empty() {
            return Err(GameError::config("at least one patient is required"));
        }
        if self.hours == 0 {
            return Err(GameError::config("hours must be at least 1"));
        }
        if self.overdue_check_hours == 0 {
            return Err(GameError::config("overdue_check_hours must be at least 1"));
        }
        for patient in &self.patients {
            if let Some(m) = patient.medicines.iter().find(|m| m.frequency_hours == 0) {
                return Err(GameError::config(format!(
                    "{} for patient {} has a zero dosing frequency",
                    m.name, patient.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MedicinePhase {
    Waiting,
    Administering,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MedicineAction {
    /// Give a patient one of their medicines at the current hour.
    Administer { patient: usize, medicine: usize },
}

/// Two simulated days of dosing a small ward on time.
#[derive(Clone, Debug)]
pub struct MedicineGame {
    config: MedicineConfig,
    phase: MedicinePhase,
    patients: Vec<Patient>,
    schedule: Vec<ScheduleItem>,
    hour: u32,
}

impl Default for MedicineGame {
    fn default() -> Self {
        Self::with_config(MedicineConfig::default())
    }
}

impl MedicineGame {
    pub fn new(config: MedicineConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: MedicineConfig) -> Self {
        Self {
            config,
            phase: MedicinePhase::Waiting,
            patients: Vec::new(),
            schedule: Vec::new(),
            hour: 0,
        }
    }

    /// Simulated hour, zero-based.
    #[must_use]
    pub fn current_hour(&self) -> u32 {
        self.hour
    }

    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    #[must_use]
    pub fn schedule(&self) -> &[ScheduleItem] {
        &self.schedule
    }

    /// Doses due this hour and not yet given.
    pub fn due_now(&self) -> impl Iterator<Item = &ScheduleItem> + '_ {
        self.schedule
            .iter()
            .filter(move |item| item.due_hour == self.hour && !item.is_completed())
    }

    #[must_use]
    pub fn doses_given(&self) -> usize {
        self.schedule.iter().filter(|i| i.is_completed()).count()
    }

    fn importance_of(&self, item: &ScheduleItem) -> Option<Importance> {
        self.patients
            .get(item.patient)?
            .medicines
            .get(item.medicine)
            .map(|m| m.importance)
    }

    /// (given, total) critical doses.
    fn critical_counts(&self) -> (u32, u32) {
        self.schedule
            .iter()
            .filter(|item| self.importance_of(item) == Some(Importance::Critical))
            .fold((0, 0), |(given, total), item| {
                (given + u32::from(item.is_completed()), total + 1)
            })
    }

    /// Charge every critical dose that went past its hour, once per dose.
    fn charge_missed(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        let hour = self.hour;
        let penalty = self.config.missed_dose_penalty;

        for item in &mut self.schedule {
            if item.is_penalized() || !item.is_overdue(hour) {
                continue;
            }
            let Some(patient) = self.patients.get_mut(item.patient) else {
                continue;
            };
            let Some(medicine) = patient.medicines.get(item.medicine) else {
                continue;
            };
            if medicine.importance != Importance::Critical {
                continue;
            }

            let message = format!("{} missed {}! -{penalty}", patient.name, medicine.name);
            item.mark_penalized();
            patient.worsen(penalty);
            ctx.session.deduct_points(penalty);
            ctx.notice(message);
        }
    }
}

impl GameRules for MedicineGame {
    type Phase = MedicinePhase;
    type Action = MedicineAction;
    type Config = MedicineConfig;
    type Timer = Infallible;

    fn kind(&self) -> GameKind {
        GameKind::MedicineSchedule
    }

    fn config(&self) -> &MedicineConfig {
        &self.config
    }

    fn phase(&self) -> MedicinePhase {
        self.phase
    }

    fn setup(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.patients = self.config.patients.clone();
        self.schedule = build_schedule(&self.patients, self.config.hours);
        self.hour = 0;
        self.phase = MedicinePhase::Administering;

        ctx.session.time_remaining = Some(self.config.hours);
        debug!(doses = self.schedule.len(), "medicine schedule built");
    }

    fn apply(
        &mut self,
        ctx: &mut RulesContext<'_, Infallible>,
        action: MedicineAction,
    ) -> Result<(), GameError> {
        let MedicineAction::Administer { patient, medicine } = action;
        if self.phase != MedicinePhase::Administering {
            return Err(GameError::InputBlocked);
        }
        let record = self.patients.get(patient).ok_or(GameError::InvalidChoice {
            index: patient,
            len: self.patients.len(),
        })?;
        let prescription = record.medicines.get(medicine).ok_or(GameError::InvalidChoice {
            index: medicine,
            len: record.medicines.len(),
        })?;
        let importance = prescription.importance;
        let name = prescription.name.clone();

        let hour = self.hour;
        let due = self.schedule.iter_mut().find(|item| {
            item.patient == patient
                && item.medicine == medicine
                && item.due_hour == hour
                && !item.is_completed()
        });

        match due {
            Some(item) => {
                item.complete();
                let points = importance.points();
                ctx.session.add_points(points);
                if let Some(record) = self.patients.get_mut(patient) {
                    record.improve(points / 2);
                }
                ctx.notice(format!("Correct! {name} given. +{points}"));
            }
            None => {
                let penalty = self.config.wrong_dose_penalty;
                ctx.session.deduct_points(penalty);
                ctx.notice(format!("Wrong time or medicine! -{penalty}"));
            }
        }
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut RulesContext<'_, Infallible>) {
        self.hour = ctx.session.ticks_elapsed;
        if self.hour % self.config.overdue_check_hours == 0 {
            self.charge_missed(ctx);
        }
    }

    fn finish(&mut self, ctx: &mut RulesContext<'_, Infallible>) -> u32 {
        self.hour = ctx.session.ticks_elapsed;
        self.charge_missed(ctx);
        self.phase = MedicinePhase::Finished;

        let (given, total) = self.critical_counts();
        if total == 0 {
            return 0;
        }
        let bonus = u64::from(self.config.adherence_bonus) * u64::from(given) / u64::from(total);
        u32::try_from(bonus).unwrap_or(self.config.adherence_bonus)
    }

    fn summary(&self, _session: &GameSession) -> String {
        format!("{} of {} doses given", self.doses_given(), self.schedule.len())
    }
}
