//! Decisions and policy verdicts.
//!
//! The decision engine emits one [`Decision`] per tick; the policy validator
//! answers with a [`PolicyVerdict`]. Both are immutable records consumed by
//! the control loop and the journal.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action verb a decision can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceAction {
    /// Power a switchable device on.
    On,
    /// Power a switchable device off.
    Off,
    /// Engage a lock.
    Locked,
    /// Disengage a lock.
    Unlocked,
    /// Take no action this tick.
    Idle,
}

impl DeviceAction {
    /// Whether this action leaves all device state untouched.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Locked => "LOCKED",
            Self::Unlocked => "UNLOCKED",
            Self::Idle => "IDLE",
        };
        write!(f, "{}", s)
    }
}

/// A proposed device action with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Target device, or `None` when no device is addressed.
    pub device: Option<String>,
    /// Proposed action.
    pub action: DeviceAction,
    /// Human-readable justification, including the trend values used.
    pub reason: String,
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,
}

impl Decision {
    /// Create a decision targeting a device.
    pub fn act(
        device: impl Into<String>,
        action: DeviceAction,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            device: Some(device.into()),
            action,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an idle decision addressing no device.
    pub fn idle(reason: impl Into<String>) -> Self {
        Self {
            device: None,
            action: DeviceAction::Idle,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Display label for the target device ("none" when absent).
    pub fn device_label(&self) -> &str {
        self.device.as_deref().unwrap_or("none")
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.device_label(), self.action)
    }
}

/// Outcome of validating a decision against policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    /// Whether the action may be applied.
    pub approved: bool,
    /// Which rule approved or blocked it.
    pub message: String,
}

impl PolicyVerdict {
    /// An approving verdict.
    pub fn approve(message: impl Into<String>) -> Self {
        Self {
            approved: true,
            message: message.into(),
        }
    }

    /// A rejecting verdict.
    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            approved: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approved {
            write!(f, "APPROVED: {}", self.message)
        } else {
            write!(f, "REJECTED: {}", self.message)
        }
    }
}
