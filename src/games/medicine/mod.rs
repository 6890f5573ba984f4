//! Medicine schedule ("Damli").
//!
//! Four patients, 48 simulated hours at one hour per second. A dose counts
//! only at its exact hour. Giving the wrong medicine or giving it at the wrong
//! hour costs points, and so does letting a critical dose lapse.

mod game;
mod schedule;
mod ward;

pub use game::{MedicineAction, MedicineConfig, MedicineGame, MedicinePhase};
pub use schedule::{build_schedule, ScheduleItem};
pub use ward::{builtin_patients, Importance, Medicine, Patient, HEALTH_FLOOR, HEALTH_MAX};
