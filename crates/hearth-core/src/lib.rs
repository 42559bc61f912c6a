//! Core types for the Hearth household controller.
//!
//! This crate defines the data model shared across the workspace: sensor
//! snapshots, manual override locks, decisions and policy verdicts, the
//! tick journal, and controller configuration.

pub mod config;
pub mod decision;
pub mod error;
pub mod journal;
pub mod locks;
pub mod snapshot;

pub use config::ControllerConfig;
pub use decision::{Decision, DeviceAction, PolicyVerdict};
pub use error::{Error, Result};
pub use journal::{Journal, LogEntry};
pub use locks::ManualLockSet;
pub use snapshot::SensorSnapshot;

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::config::ControllerConfig;
    pub use crate::decision::{Decision, DeviceAction, PolicyVerdict};
    pub use crate::error::{Error, Result};
    pub use crate::journal::{Journal, LogEntry};
    pub use crate::locks::ManualLockSet;
    pub use crate::snapshot::SensorSnapshot;
}
