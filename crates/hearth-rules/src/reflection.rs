//! Post-hoc energy-efficiency narration.
//!
//! A pure function of the decision, the snapshot, and the manual-lock set.
//! Always returns a non-empty sentence; never fails.

use hearth_core::config::{COMFORT_MAX, COMFORT_MIN};
use hearth_core::decision::{Decision, DeviceAction};
use hearth_core::locks::ManualLockSet;
use hearth_core::snapshot::SensorSnapshot;
use hearth_devices::catalog;

/// Ambient level above which extra lighting is waste (lumens).
const ALREADY_BRIGHT: i64 = 600;

fn is_climate(device_id: &str) -> bool {
    device_id == catalog::HEATER_MAIN || device_id == catalog::AC_MAIN
}

fn within_comfort(temperature: f64) -> bool {
    (COMFORT_MIN..=COMFORT_MAX).contains(&temperature)
}

/// Narrate the energy trade-off of a decision.
pub fn reflect(decision: &Decision, snapshot: &SensorSnapshot, locks: &ManualLockSet) -> String {
    if decision.action.is_idle() {
        if snapshot.occupancy && within_comfort(snapshot.temperature) && !locks.any_locked() {
            return "System stayed idle while conditions were comfortable; this is energy-efficient.".to_string();
        }
        if locks.any_locked() {
            return format!(
                "System stayed idle with {} under manual control; deferring to the operator.",
                locks.locked_ids().join(", ")
            );
        }
        if !snapshot.occupancy {
            return "House is empty and the system stayed idle; this is highly energy-efficient.".to_string();
        }
        return "System stayed idle; no energy was spent this tick.".to_string();
    }

    let device_id = decision.device_label();
    let engaging = matches!(decision.action, DeviceAction::On | DeviceAction::Unlocked);

    if engaging && !snapshot.occupancy {
        return "Turning devices on while the house is empty is not energy-efficient.".to_string();
    }

    if is_climate(device_id) && decision.action == DeviceAction::On {
        if within_comfort(snapshot.temperature) {
            return format!(
                "Temperature is already comfortable at {:.1} °C; running {} may waste energy.",
                snapshot.temperature, device_id
            );
        }
        return format!(
            "Turning {} on is reasonable at {:.1} °C, but it should go off once the comfort range is reached.",
            device_id, snapshot.temperature
        );
    }

    if device_id.contains("light") && decision.action == DeviceAction::On {
        if snapshot.light_level > ALREADY_BRIGHT {
            return "Turning lights on while the room is already bright wastes energy.".to_string();
        }
        return format!(
            "Turning lights on at {} lm is acceptable.",
            snapshot.light_level
        );
    }

    "The decision seems reasonable from an energy perspective given current conditions.".to_string()
}
