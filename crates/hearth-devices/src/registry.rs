//! Device registry: catalog, validated updates, energy accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hearth_core::decision::DeviceAction;

use crate::domain::{DeviceKind, DeviceState};
use crate::error::{DeviceError, Result};

/// Stable IDs of the stock catalog.
pub mod catalog {
    pub const HEATER_MAIN: &str = "heater_main";
    pub const AC_MAIN: &str = "ac_main";
    pub const LIGHTS_LIVING: &str = "lights_living";
    pub const SMART_LOCK: &str = "smart_lock";
}

/// A registered household device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Unique device ID.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Device kind.
    pub kind: DeviceKind,
    /// Current state.
    pub state: DeviceState,
    /// Nominal power draw when powered, in watts.
    pub power_watts: u32,
    /// When the state last changed; `None` until first transition.
    pub last_changed: Option<DateTime<Utc>>,
}

impl Device {
    /// Create a device in its initial state.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: DeviceKind,
        state: DeviceState,
        power_watts: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            state,
            power_watts,
            last_changed: None,
        }
    }
}

/// Read-only view of one device, handed to the policy validator and the
/// dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceView {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
    pub state: DeviceState,
    pub power_watts: u32,
    pub last_changed: Option<DateTime<Utc>>,
}

/// Point-in-time view of the whole registry, in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    devices: Vec<DeviceView>,
}

impl DeviceSnapshot {
    /// Look up a device view by ID.
    pub fn get(&self, device_id: &str) -> Option<&DeviceView> {
        self.devices.iter().find(|d| d.id == device_id)
    }

    /// Whether a device exists.
    pub fn contains(&self, device_id: &str) -> bool {
        self.get(device_id).is_some()
    }

    /// All device views in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceView> {
        self.devices.iter()
    }

    /// Total wattage of devices currently powered (ON or UNLOCKED).
    pub fn powered_watts(&self) -> u32 {
        self.devices
            .iter()
            .filter(|d| d.state.is_powered())
            .map(|d| d.power_watts)
            .sum()
    }
}

/// Registry of household devices.
///
/// Devices are created at initialization and never destroyed during a run;
/// the only mutation path is [`DeviceRegistry::apply`].
#[derive(Debug)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Create a registry over an explicit device list (tests, alternate
    /// catalogs). Order is preserved for display.
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    /// Create a registry with the stock four-device catalog.
    pub fn with_default_catalog() -> Self {
        Self::new(vec![
            Device::new(
                catalog::HEATER_MAIN,
                "Main Heater",
                DeviceKind::Heater,
                DeviceState::Off,
                1500,
            ),
            Device::new(
                catalog::AC_MAIN,
                "Air Conditioner",
                DeviceKind::Ac,
                DeviceState::Off,
                1700,
            ),
            Device::new(
                catalog::LIGHTS_LIVING,
                "Living Room Lights",
                DeviceKind::Light,
                DeviceState::Off,
                200,
            ),
            Device::new(
                catalog::SMART_LOCK,
                "Smart Door Lock",
                DeviceKind::Lock,
                DeviceState::Locked,
                0,
            ),
        ])
    }

    /// All devices in catalog order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Look up a device by ID.
    pub fn get(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == device_id)
    }

    /// Apply a validated action to a device.
    ///
    /// `Idle` is a no-op success and never stamps `last_changed`. Unknown
    /// devices and type-incompatible actions are rejected without touching
    /// state; the policy validator should already have filtered them out.
    /// On success the state is updated, `last_changed` is stamped, and a
    /// transition message is returned.
    pub fn apply(&mut self, device_id: &str, action: DeviceAction) -> Result<String> {
        if action.is_idle() {
            debug!(device_id, "idle action, no device update");
            return Ok("no device action taken (IDLE)".to_string());
        }

        let device = self
            .devices
            .iter_mut()
            .find(|d| d.id == device_id)
            .ok_or_else(|| DeviceError::NotFound {
                device_id: device_id.to_string(),
            })?;

        if !device.kind.supports(action) {
            return Err(DeviceError::IncompatibleAction {
                device_id: device_id.to_string(),
                action,
            });
        }

        // supports() only admits verbs with a target state, so this is total.
        let new_state = match DeviceState::from_action(action) {
            Some(state) => state,
            None => return Ok("no device action taken (IDLE)".to_string()),
        };

        let old_state = device.state;
        device.state = new_state;
        device.last_changed = Some(Utc::now());

        info!(device_id, %old_state, %new_state, "device state changed");
        Ok(format!(
            "{} changed from {} to {}",
            device.id, old_state, new_state
        ))
    }

    /// Total wattage of devices currently powered (ON or UNLOCKED).
    ///
    /// UNLOCKED counts as powered for a smart lock's sensing/motor draw
    /// model even though the stock catalog configures the lock at 0 W.
    pub fn energy_usage(&self) -> u32 {
        self.devices
            .iter()
            .filter(|d| d.state.is_powered())
            .map(|d| d.power_watts)
            .sum()
    }

    /// Point-in-time read-only view of all devices.
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            devices: self
                .devices
                .iter()
                .map(|d| DeviceView {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    kind: d.kind,
                    state: d.state,
                    power_watts: d.power_watts,
                    last_changed: d.last_changed,
                })
                .collect(),
        }
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}
