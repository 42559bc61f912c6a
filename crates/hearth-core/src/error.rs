//! Error types shared across the workspace.

/// Workspace-wide error type.
///
/// Crate-local errors (e.g. `DeviceError` in `hearth-devices`) convert into
/// this type at crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
