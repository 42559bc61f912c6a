//! Safety and energy policy validation.
//!
//! Every proposed action passes through [`PolicyValidator::validate`] before
//! it may touch device state. Rules are checked in a fixed order and the
//! first failure blocks. The validator is history-dependent through
//! [`PolicyState`]: the last *approved* action per device feeds the
//! anti-oscillation guard. Rejections never mutate state, so re-validating
//! a rejected proposal is idempotent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use hearth_core::config::DEFAULT_POWER_LIMIT_WATTS;
use hearth_core::decision::{Decision, DeviceAction, PolicyVerdict};
use hearth_core::snapshot::SensorSnapshot;
use hearth_devices::{DeviceKind, DeviceSnapshot};

/// Heater may not be switched on above this temperature (°C).
const HEATER_MAX_TEMP: f64 = 28.0;
/// AC may not be switched on below this temperature (°C).
const AC_MIN_TEMP: f64 = 18.0;
/// Lights may not be switched on above this ambient level (lumens).
const BRIGHT_ENOUGH: i64 = 600;

/// Mutable validator state: last approved action per device plus the fixed
/// power budget. Owned by one validator instance, never ambient, so
/// independent controllers cannot interfere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyState {
    last_approved: HashMap<String, DeviceAction>,
    power_limit_watts: u32,
}

impl PolicyState {
    fn new(power_limit_watts: u32) -> Self {
        Self {
            last_approved: HashMap::new(),
            power_limit_watts,
        }
    }

    /// The last approved action for a device, if any.
    pub fn last_approved(&self, device_id: &str) -> Option<DeviceAction> {
        self.last_approved.get(device_id).copied()
    }

    /// The enforced power budget in watts.
    pub fn power_limit_watts(&self) -> u32 {
        self.power_limit_watts
    }
}

/// Validates proposed actions against safety and energy policy.
#[derive(Debug)]
pub struct PolicyValidator {
    state: PolicyState,
}

impl PolicyValidator {
    /// Create a validator with the stock 3500 W budget.
    pub fn new() -> Self {
        Self {
            state: PolicyState::new(DEFAULT_POWER_LIMIT_WATTS),
        }
    }

    /// Override the power budget (alternate household profiles, tests).
    pub fn with_power_limit(mut self, watts: u32) -> Self {
        self.state.power_limit_watts = watts;
        self
    }

    /// Read access to the validator's state for inspection.
    pub fn state(&self) -> &PolicyState {
        &self.state
    }

    /// Validate a proposed decision against the current snapshot and a
    /// point-in-time registry view.
    ///
    /// State is mutated only on the approval path: `last_approved` records
    /// the newly approved action. Every rejection leaves the validator
    /// exactly as it was.
    pub fn validate(
        &mut self,
        decision: &Decision,
        snapshot: &SensorSnapshot,
        devices: &DeviceSnapshot,
    ) -> PolicyVerdict {
        // 1. Idle is always allowed and changes nothing.
        if decision.action.is_idle() {
            return PolicyVerdict::approve("idle action allowed");
        }

        // 2. The target must exist.
        let Some(device_id) = decision.device.as_deref() else {
            return PolicyVerdict::reject("non-idle action addresses no device");
        };
        let Some(device) = devices.get(device_id) else {
            return PolicyVerdict::reject(format!("device '{}' does not exist", device_id));
        };

        let action = decision.action;

        // 3. Empty-house safety rules.
        if !snapshot.occupancy {
            if device.kind.is_climate() && action == DeviceAction::On {
                return PolicyVerdict::reject(
                    "cannot turn heater/AC on while the house is empty",
                );
            }
            if device_id.contains("light") && action == DeviceAction::On {
                return PolicyVerdict::reject(
                    "lights cannot be turned on while the house is empty",
                );
            }
            if device.kind == DeviceKind::Lock && action == DeviceAction::Unlocked {
                return PolicyVerdict::reject(
                    "front door cannot be unlocked while the house is empty",
                );
            }
        }

        // 4. Temperature safety guards.
        if device.kind == DeviceKind::Heater
            && action == DeviceAction::On
            && snapshot.temperature > HEATER_MAX_TEMP
        {
            return PolicyVerdict::reject(format!(
                "heater cannot be turned on above {:.0} °C (safety rule)",
                HEATER_MAX_TEMP
            ));
        }
        if device.kind == DeviceKind::Ac
            && action == DeviceAction::On
            && snapshot.temperature < AC_MIN_TEMP
        {
            return PolicyVerdict::reject(format!(
                "AC cannot be turned on below {:.0} °C (overcooling guard)",
                AC_MIN_TEMP
            ));
        }

        // 5. Already-bright guard.
        if device_id.contains("light")
            && action == DeviceAction::On
            && snapshot.light_level > BRIGHT_ENOUGH
        {
            return PolicyVerdict::reject(format!(
                "light level {} lm is already bright enough",
                snapshot.light_level
            ));
        }

        // 6. Anti-oscillation guard against the last approved action.
        if let Some(last) = self.state.last_approved(device_id) {
            if last != action {
                return PolicyVerdict::reject(format!(
                    "rapid switching detected on {}; action blocked",
                    device_id
                ));
            }
        }

        // 7. Power budget across everything currently powered, plus the
        //    candidate when it is being switched on.
        let mut total_watts = devices.powered_watts();
        if action == DeviceAction::On {
            total_watts += device.power_watts;
        }
        if total_watts > self.state.power_limit_watts {
            return PolicyVerdict::reject(format!(
                "power limit exceeded ({} W > {} W); action blocked",
                total_watts, self.state.power_limit_watts
            ));
        }

        // 8. Type/action compatibility.
        if !device.kind.supports(action) {
            return if device.kind == DeviceKind::Lock {
                PolicyVerdict::reject("locks only accept LOCKED/UNLOCKED commands")
            } else {
                PolicyVerdict::reject(format!(
                    "invalid action '{}' for device '{}'",
                    action, device_id
                ))
            };
        }

        // 9. Approved: record it for the oscillation guard.
        self.state
            .last_approved
            .insert(device_id.to_string(), action);
        debug!(device_id, %action, "action approved");
        PolicyVerdict::approve("action approved")
    }
}

impl Default for PolicyValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_devices::{catalog, Device, DeviceRegistry, DeviceState};

    fn occupied(temperature: f64, light_level: i64) -> SensorSnapshot {
        SensorSnapshot::new(temperature, 50, light_level, true)
    }

    fn empty_house() -> SensorSnapshot {
        SensorSnapshot::new(22.0, 50, 400, false)
    }

    fn stock() -> DeviceSnapshot {
        DeviceRegistry::with_default_catalog().snapshot()
    }

    fn on(device_id: &str) -> Decision {
        Decision::act(device_id, DeviceAction::On, "test")
    }

    #[test]
    fn test_idle_always_approved() {
        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(&Decision::idle("stable"), &occupied(22.0, 400), &stock());
        assert!(verdict.approved);
        assert!(validator.state().last_approved("heater_main").is_none());
    }

    #[test]
    fn test_unknown_device_rejected() {
        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(&on("garage_door"), &occupied(22.0, 400), &stock());
        assert!(!verdict.approved);
        assert!(verdict.message.contains("does not exist"));
    }

    #[test]
    fn test_empty_house_rejects_climate_lights_and_unlock() {
        let mut validator = PolicyValidator::new();
        let devices = stock();

        for device_id in [catalog::HEATER_MAIN, catalog::AC_MAIN] {
            let verdict = validator.validate(&on(device_id), &empty_house(), &devices);
            assert!(!verdict.approved);
            assert!(verdict.message.contains("empty"));
        }

        let verdict = validator.validate(&on(catalog::LIGHTS_LIVING), &empty_house(), &devices);
        assert!(!verdict.approved);

        let unlock = Decision::act(catalog::SMART_LOCK, DeviceAction::Unlocked, "test");
        let verdict = validator.validate(&unlock, &empty_house(), &devices);
        assert!(!verdict.approved);
        assert!(verdict.message.contains("unlocked"));
    }

    #[test]
    fn test_heater_blocked_when_scalding() {
        let mut validator = PolicyValidator::new();
        // 29 °C rejects the heater regardless of the power budget.
        let verdict = validator.validate(&on(catalog::HEATER_MAIN), &occupied(29.0, 400), &stock());
        assert!(!verdict.approved);
        assert!(verdict.message.contains("28"));
    }

    #[test]
    fn test_ac_blocked_when_overcooling() {
        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(&on(catalog::AC_MAIN), &occupied(17.0, 400), &stock());
        assert!(!verdict.approved);
        assert!(verdict.message.contains("18"));
    }

    #[test]
    fn test_lights_blocked_when_already_bright() {
        let mut validator = PolicyValidator::new();
        let verdict =
            validator.validate(&on(catalog::LIGHTS_LIVING), &occupied(22.0, 700), &stock());
        assert!(!verdict.approved);
        assert!(verdict.message.contains("bright"));
    }

    #[test]
    fn test_oscillation_guard() {
        let mut validator = PolicyValidator::new();
        let devices = stock();
        let snapshot = occupied(26.0, 400);

        let verdict = validator.validate(&on(catalog::AC_MAIN), &snapshot, &devices);
        assert!(verdict.approved);
        assert_eq!(
            validator.state().last_approved(catalog::AC_MAIN),
            Some(DeviceAction::On)
        );

        // A contradicting proposal with no intervening approval is blocked.
        let off = Decision::act(catalog::AC_MAIN, DeviceAction::Off, "test");
        let verdict = validator.validate(&off, &snapshot, &devices);
        assert!(!verdict.approved);
        assert!(verdict.message.contains("rapid switching"));

        // Repeating the approved action is still fine.
        let verdict = validator.validate(&on(catalog::AC_MAIN), &snapshot, &devices);
        assert!(verdict.approved);
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let mut validator = PolicyValidator::new();
        let devices = stock();
        let snapshot = occupied(26.0, 400);

        validator.validate(&on(catalog::AC_MAIN), &snapshot, &devices);
        let off = Decision::act(catalog::AC_MAIN, DeviceAction::Off, "test");

        let first = validator.validate(&off, &snapshot, &devices);
        let second = validator.validate(&off, &snapshot, &devices);
        assert_eq!(first, second);
        assert_eq!(
            validator.state().last_approved(catalog::AC_MAIN),
            Some(DeviceAction::On)
        );
    }

    #[test]
    fn test_power_budget_boundary() {
        // 2000 W already on; a 1500 W candidate lands exactly on the limit.
        let registry = DeviceRegistry::new(vec![
            Device::new("space_heater", "Space Heater", DeviceKind::Heater, DeviceState::On, 2000),
            Device::new("oil_radiator", "Oil Radiator", DeviceKind::Heater, DeviceState::Off, 1500),
            Device::new("fan_heater", "Fan Heater", DeviceKind::Heater, DeviceState::Off, 1501),
        ]);
        let devices = registry.snapshot();
        let snapshot = occupied(15.0, 400);

        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(&on("oil_radiator"), &snapshot, &devices);
        assert!(verdict.approved, "exactly 3500 W must pass: {}", verdict.message);

        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(&on("fan_heater"), &snapshot, &devices);
        assert!(!verdict.approved);
        assert!(verdict.message.contains("3501"));
        assert!(verdict.message.contains("power limit"));
    }

    #[test]
    fn test_power_budget_counts_unlocked_devices() {
        let registry = DeviceRegistry::new(vec![
            Device::new("garage_lock", "Garage Lock", DeviceKind::Lock, DeviceState::Unlocked, 200),
            Device::new("space_heater", "Space Heater", DeviceKind::Heater, DeviceState::Off, 3400),
        ]);
        let mut validator = PolicyValidator::new();
        let verdict = validator.validate(
            &on("space_heater"),
            &occupied(15.0, 400),
            &registry.snapshot(),
        );
        assert!(!verdict.approved);
        assert!(verdict.message.contains("3600"));
    }

    #[test]
    fn test_incompatible_action_rejected() {
        let mut validator = PolicyValidator::new();
        let devices = stock();
        let snapshot = occupied(22.0, 400);

        let verdict = validator.validate(&on(catalog::SMART_LOCK), &snapshot, &devices);
        assert!(!verdict.approved);
        assert!(verdict.message.contains("LOCKED/UNLOCKED"));

        let weird = Decision::act(catalog::HEATER_MAIN, DeviceAction::Unlocked, "test");
        let verdict = validator.validate(&weird, &snapshot, &devices);
        assert!(!verdict.approved);
        assert!(verdict.message.contains("invalid action"));
    }

    #[test]
    fn test_custom_power_limit() {
        let mut validator = PolicyValidator::new().with_power_limit(1000);
        let verdict = validator.validate(&on(catalog::AC_MAIN), &occupied(26.0, 400), &stock());
        assert!(!verdict.approved);
        assert!(verdict.message.contains("1000"));
    }
}
