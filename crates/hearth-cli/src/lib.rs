//! Control-loop collaborators for the `hearth` binary: tick orchestration,
//! simulated sensors, and the terminal dashboard.

pub mod controller;
pub mod dashboard;
pub mod sensors;

pub use controller::Controller;
pub use sensors::SensorSimulator;
