//! Session state, outcomes and the host contract.

pub mod host;
pub mod outcome;
pub mod state;

pub use host::{GameHost, RecordingHost};
pub use outcome::{EndReason, Outcome};
pub use state::{GameSession, Lifecycle};
