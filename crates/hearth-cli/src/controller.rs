//! One-tick orchestration: sense -> decide -> validate -> act -> reflect -> log.
//!
//! The controller owns the decision engine, the policy validator, the device
//! registry, and the journal. Policy and registry rejections become journal
//! messages; nothing here ever aborts the loop.

use tracing::{info, warn};

use hearth_core::config::ControllerConfig;
use hearth_core::decision::{Decision, DeviceAction, PolicyVerdict};
use hearth_core::journal::{Journal, LogEntry};
use hearth_core::locks::ManualLockSet;
use hearth_core::snapshot::SensorSnapshot;
use hearth_devices::{DeviceError, DeviceRegistry};
use hearth_rules::{reflect, DecisionEngine, PolicyValidator};

/// Sequential controller driving the decision-and-policy core.
pub struct Controller {
    engine: DecisionEngine,
    validator: PolicyValidator,
    registry: DeviceRegistry,
    journal: Journal,
    last_snapshot: SensorSnapshot,
}

impl Controller {
    /// Controller over the stock catalog, budget taken from config.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            engine: DecisionEngine::new(),
            validator: PolicyValidator::new().with_power_limit(config.power_limit_watts),
            registry: DeviceRegistry::with_default_catalog(),
            journal: Journal::new(),
            last_snapshot: SensorSnapshot::default(),
        }
    }

    /// Run one control-loop tick and journal the outcome.
    pub fn tick(&mut self, snapshot: SensorSnapshot, locks: &ManualLockSet) -> LogEntry {
        let decision = self.engine.decide(&snapshot, locks);
        let verdict = self
            .validator
            .validate(&decision, &snapshot, &self.registry.snapshot());

        let device_message = if verdict.approved {
            match decision.device.as_deref() {
                Some(device_id) => match self.registry.apply(device_id, decision.action) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!(device_id, error = %e, "device update failed");
                        format!("update failed: {}", e)
                    }
                },
                None => "no device action required (IDLE)".to_string(),
            }
        } else {
            info!(decision = %decision, verdict = %verdict.message, "action blocked by policy");
            format!("action blocked: {}", verdict.message)
        };

        let reflection = reflect(&decision, &snapshot, locks);
        let entry = LogEntry::new(snapshot.clone(), decision, verdict, device_message, reflection);
        self.journal.append(entry.clone());
        self.last_snapshot = snapshot;
        entry
    }

    /// Apply an operator-issued action directly, bypassing the decision
    /// engine and the policy validator, and journal it as a manual entry.
    ///
    /// The caller is responsible for engaging the manual lock so automation
    /// keeps its hands off the device afterwards.
    pub fn manual_apply(
        &mut self,
        device_id: &str,
        action: DeviceAction,
    ) -> Result<String, DeviceError> {
        let message = self.registry.apply(device_id, action)?;
        info!(device_id, %action, "manual override applied");

        let decision = Decision::act(device_id, action, "manual override by operator");
        let entry = LogEntry::new(
            self.last_snapshot.clone(),
            decision,
            PolicyVerdict::approve("manual override; policy bypassed"),
            message.clone(),
            format!(
                "Operator manually set {} to {}; manual lock engaged.",
                device_id, action
            ),
        );
        self.journal.append(entry);
        Ok(message)
    }

    /// The device registry (read access for rendering).
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The tick journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_devices::{catalog, DeviceState};

    fn controller() -> Controller {
        Controller::new(&ControllerConfig::new())
    }

    #[test]
    fn test_tick_journals_every_outcome() {
        let mut controller = controller();
        let locks = ManualLockSet::new();

        controller.tick(SensorSnapshot::new(26.0, 50, 500, true), &locks);
        controller.tick(SensorSnapshot::new(22.0, 50, 400, true), &locks);

        assert_eq!(controller.journal().len(), 2);
        let latest = controller.journal().latest().unwrap();
        assert!(latest.verdict.approved);
    }

    #[test]
    fn test_rejection_becomes_message_not_abort() {
        let mut controller = controller();
        let locks = ManualLockSet::new();

        // Hot and approved.
        controller.tick(SensorSnapshot::new(26.0, 50, 500, true), &locks);
        assert_eq!(
            controller.registry().get(catalog::AC_MAIN).unwrap().state,
            DeviceState::On
        );

        // Empty house proposes idle; still journaled and approved.
        let entry = controller.tick(SensorSnapshot::new(26.0, 50, 500, false), &locks);
        assert!(entry.verdict.approved);
        assert_eq!(entry.decision.action, DeviceAction::Idle);
        assert_eq!(controller.journal().len(), 2);
    }

    #[test]
    fn test_manual_apply_bypasses_policy_and_journals() {
        let mut controller = controller();

        // Policy would reject heater ON at 29 °C; manual control may not.
        controller.tick(SensorSnapshot::new(29.0, 50, 500, true), &ManualLockSet::new());
        let message = controller
            .manual_apply(catalog::HEATER_MAIN, DeviceAction::On)
            .unwrap();
        assert!(message.contains("OFF to ON"));
        assert_eq!(
            controller.registry().get(catalog::HEATER_MAIN).unwrap().state,
            DeviceState::On
        );

        let latest = controller.journal().latest().unwrap();
        assert!(latest.verdict.message.contains("manual override"));
        assert!(latest.reflection.contains(catalog::HEATER_MAIN));
    }

    #[test]
    fn test_manual_apply_unknown_device_errors() {
        let mut controller = controller();
        let before = controller.journal().len();
        assert!(controller
            .manual_apply("garage_door", DeviceAction::On)
            .is_err());
        assert_eq!(controller.journal().len(), before);
    }
}
