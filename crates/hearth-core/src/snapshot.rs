//! Environment sensor snapshot.
//!
//! One immutable snapshot is produced per control-loop tick. Missing fields
//! in serialized input fall back to documented defaults rather than erroring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default temperature when a reading is absent (°C).
pub const DEFAULT_TEMPERATURE: f64 = 22.0;
/// Default relative humidity when a reading is absent (%).
pub const DEFAULT_HUMIDITY: u8 = 50;
/// Default light level when a reading is absent (lumens).
pub const DEFAULT_LIGHT_LEVEL: i64 = 400;
/// Occupancy is assumed when no presence reading is available.
pub const DEFAULT_OCCUPANCY: bool = true;

/// One tick's immutable set of sensor readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Ambient temperature in °C.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Relative humidity in percent.
    #[serde(default = "default_humidity")]
    pub humidity: u8,
    /// Light level in lumens.
    #[serde(default = "default_light_level")]
    pub light_level: i64,
    /// Whether the house is occupied.
    #[serde(default = "default_occupancy")]
    pub occupancy: bool,
    /// When the readings were taken.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_humidity() -> u8 {
    DEFAULT_HUMIDITY
}

fn default_light_level() -> i64 {
    DEFAULT_LIGHT_LEVEL
}

fn default_occupancy() -> bool {
    DEFAULT_OCCUPANCY
}

impl SensorSnapshot {
    /// Create a snapshot from explicit readings, stamped now.
    pub fn new(temperature: f64, humidity: u8, light_level: i64, occupancy: bool) -> Self {
        Self {
            temperature,
            humidity,
            light_level,
            occupancy,
            timestamp: Utc::now(),
        }
    }

    /// Override the timestamp (e.g. when replaying recorded readings).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::new(
            DEFAULT_TEMPERATURE,
            DEFAULT_HUMIDITY,
            DEFAULT_LIGHT_LEVEL,
            DEFAULT_OCCUPANCY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let snapshot: SensorSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(snapshot.humidity, DEFAULT_HUMIDITY);
        assert_eq!(snapshot.light_level, DEFAULT_LIGHT_LEVEL);
        assert!(snapshot.occupancy);
    }

    #[test]
    fn test_present_fields_win_over_defaults() {
        let snapshot: SensorSnapshot =
            serde_json::from_str(r#"{"temperature": 17.5, "occupancy": false}"#).unwrap();
        assert_eq!(snapshot.temperature, 17.5);
        assert!(!snapshot.occupancy);
        assert_eq!(snapshot.light_level, DEFAULT_LIGHT_LEVEL);
    }

    #[test]
    fn test_roundtrip() {
        let snapshot = SensorSnapshot::new(26.0, 55, 500, true);
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: SensorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
