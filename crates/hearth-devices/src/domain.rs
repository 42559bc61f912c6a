//! Device domain: kinds, states, and action compatibility.
//!
//! Kinds and states are closed enums so the type/action compatibility rule
//! is a compile-checked match instead of a string comparison.

use std::fmt;

use hearth_core::decision::DeviceAction;
use serde::{Deserialize, Serialize};

/// Kind of household device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Heater,
    Ac,
    Light,
    Lock,
}

impl DeviceKind {
    /// Whether this kind is a climate device (heater or AC).
    pub fn is_climate(&self) -> bool {
        matches!(self, Self::Heater | Self::Ac)
    }

    /// Whether the action verb is meaningful for this kind.
    ///
    /// Locks only accept LOCKED/UNLOCKED; every other kind only ON/OFF.
    /// IDLE is universally acceptable since it changes nothing.
    pub fn supports(&self, action: DeviceAction) -> bool {
        match (self, action) {
            (_, DeviceAction::Idle) => true,
            (Self::Lock, DeviceAction::Locked | DeviceAction::Unlocked) => true,
            (Self::Lock, _) => false,
            (_, DeviceAction::On | DeviceAction::Off) => true,
            (_, _) => false,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Heater => "heater",
            Self::Ac => "ac",
            Self::Light => "light",
            Self::Lock => "lock",
        };
        write!(f, "{}", s)
    }
}

/// Current state of a device.
///
/// Heater/AC/light devices are `On`/`Off`; locks are `Locked`/`Unlocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceState {
    On,
    Off,
    Locked,
    Unlocked,
}

impl DeviceState {
    /// The state an action transitions a device into, if any.
    pub fn from_action(action: DeviceAction) -> Option<Self> {
        match action {
            DeviceAction::On => Some(Self::On),
            DeviceAction::Off => Some(Self::Off),
            DeviceAction::Locked => Some(Self::Locked),
            DeviceAction::Unlocked => Some(Self::Unlocked),
            DeviceAction::Idle => None,
        }
    }

    /// Whether the state draws power.
    ///
    /// An unlocked smart lock counts as powered (sensing/motor draw), even
    /// though the stock catalog configures it at 0 W.
    pub fn is_powered(&self) -> bool {
        matches!(self, Self::On | Self::Unlocked)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Locked => "LOCKED",
            Self::Unlocked => "UNLOCKED",
        };
        write!(f, "{}", s)
    }
}
