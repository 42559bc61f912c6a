//! Rule-based decision engine.
//!
//! Deterministic given the current snapshot and the trend memory it carries
//! between ticks. Rules are evaluated in a fixed priority order; the first
//! match wins. Manual-override locks are arbitrated last: a lock on the
//! chosen device discards the proposal entirely.

use tracing::debug;

use hearth_core::decision::{Decision, DeviceAction};
use hearth_core::locks::ManualLockSet;
use hearth_core::snapshot::SensorSnapshot;
use hearth_devices::catalog;

use crate::trend::TrendMemory;

/// Heating triggers immediately below this temperature (°C).
const HEAT_BELOW: f64 = 19.0;
/// Heating triggers proactively below this temperature when falling (°C).
const HEAT_TREND_BELOW: f64 = 21.0;
/// A temperature trend below this counts as falling (°C/tick).
const FALLING_TEMP: f64 = -0.30;
/// Cooling triggers immediately above this temperature (°C).
const COOL_ABOVE: f64 = 25.0;
/// Cooling triggers proactively above this temperature when rising (°C).
const COOL_TREND_ABOVE: f64 = 24.0;
/// A temperature trend above this counts as rising (°C/tick).
const RISING_TEMP: f64 = 0.30;
/// Lights trigger immediately below this level (lumens).
const LIGHTS_BELOW: i64 = 120;
/// Lights trigger proactively below this level when dimming (lumens).
const LIGHTS_TREND_BELOW: i64 = 180;
/// A light trend below this counts as dimming (lumens/tick).
const DIMMING_LIGHT: f64 = -15.0;

/// Stateful rule evaluator producing one [`Decision`] per tick.
#[derive(Debug, Default)]
pub struct DecisionEngine {
    memory: TrendMemory,
}

impl DecisionEngine {
    /// Create an engine with empty trend memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over pre-seeded trend memory (tests, warm restart).
    pub fn with_memory(memory: TrendMemory) -> Self {
        Self { memory }
    }

    /// The trend memory accumulated so far.
    pub fn memory(&self) -> &TrendMemory {
        &self.memory
    }

    /// Evaluate the rules for one tick.
    ///
    /// Always returns a decision; the only side effect is pushing the
    /// snapshot's readings into trend memory.
    pub fn decide(&mut self, snapshot: &SensorSnapshot, locks: &ManualLockSet) -> Decision {
        self.memory.observe(snapshot);
        let temp_trend = self.memory.temperature_trend();
        let light_trend = self.memory.light_trend();

        debug!(
            temperature = snapshot.temperature,
            light_level = snapshot.light_level,
            occupancy = snapshot.occupancy,
            temp_trend,
            light_trend,
            "evaluating decision rules"
        );

        if !snapshot.occupancy {
            return Decision::idle("house is empty; staying idle to save energy");
        }

        let temp = snapshot.temperature;
        let light = snapshot.light_level;

        // Fixed priority: temperature rules outrank light rules by position,
        // not by magnitude.
        let proposal = if temp < HEAT_BELOW || (temp < HEAT_TREND_BELOW && temp_trend < FALLING_TEMP)
        {
            Some((
                catalog::HEATER_MAIN,
                DeviceAction::On,
                format!(
                    "temperature {:.1} °C with trend {:+.2} °C/tick; turning heater on before it gets cold",
                    temp, temp_trend
                ),
            ))
        } else if temp > COOL_ABOVE || (temp > COOL_TREND_ABOVE && temp_trend > RISING_TEMP) {
            Some((
                catalog::AC_MAIN,
                DeviceAction::On,
                format!(
                    "temperature {:.1} °C with trend {:+.2} °C/tick; turning AC on",
                    temp, temp_trend
                ),
            ))
        } else if light < LIGHTS_BELOW
            || (light < LIGHTS_TREND_BELOW && light_trend < DIMMING_LIGHT)
        {
            Some((
                catalog::LIGHTS_LIVING,
                DeviceAction::On,
                format!(
                    "light level {} lm with trend {:+.1} lm/tick; turning living room lights on",
                    light, light_trend
                ),
            ))
        } else {
            None
        };

        match proposal {
            Some((device_id, action, reason)) => {
                if locks.is_locked(device_id) {
                    Decision::idle(format!(
                        "{} is under manual control; holding automation idle",
                        device_id
                    ))
                } else {
                    Decision::act(device_id, action, reason)
                }
            }
            None => Decision::idle(format!(
                "conditions stable (temperature trend {:+.2} °C/tick, light trend {:+.1} lm/tick); no action needed",
                temp_trend, light_trend
            )),
        }
    }
}
