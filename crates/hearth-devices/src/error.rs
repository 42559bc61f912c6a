//! Error types for the devices crate.

use hearth_core::decision::DeviceAction;
use hearth_core::error::Error as CoreError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeviceError {
    #[error("device '{device_id}' does not exist")]
    NotFound { device_id: String },

    #[error("invalid action '{action}' for device '{device_id}'")]
    IncompatibleAction {
        device_id: String,
        action: DeviceAction,
    },
}

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

impl From<DeviceError> for CoreError {
    fn from(e: DeviceError) -> Self {
        match e {
            DeviceError::NotFound { device_id } => CoreError::UnknownDevice(device_id),
            DeviceError::IncompatibleAction { .. } => CoreError::Validation(e.to_string()),
        }
    }
}
