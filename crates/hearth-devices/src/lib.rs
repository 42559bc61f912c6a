//! Device registry for the Hearth controller.
//!
//! Holds the household device catalog and is the single mutation point for
//! device state: every state change goes through [`DeviceRegistry::apply`],
//! which validates the target and the action before touching anything.

pub mod domain;
pub mod error;
pub mod registry;

pub use domain::{DeviceKind, DeviceState};
pub use error::DeviceError;
pub use registry::{catalog, Device, DeviceRegistry, DeviceSnapshot, DeviceView};
