//! Simulated environment sensors.
//!
//! A seedable random walk over temperature, humidity, light, and occupancy.
//! Walks (rather than independent draws) give the trend rules something real
//! to react to. Replaceable collaborator: the controller consumes any
//! `SensorSnapshot` source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hearth_core::snapshot::SensorSnapshot;

const TEMP_MIN: f64 = 12.0;
const TEMP_MAX: f64 = 38.0;
const HUMIDITY_MIN: i32 = 30;
const HUMIDITY_MAX: i32 = 70;
const LIGHT_MIN: i64 = 0;
const LIGHT_MAX: i64 = 900;
/// Probability per tick that occupancy flips.
const OCCUPANCY_FLIP: f64 = 0.12;

/// Random-walk sensor simulator.
#[derive(Debug)]
pub struct SensorSimulator {
    rng: StdRng,
    temperature: f64,
    humidity: i32,
    light_level: i64,
    occupancy: bool,
}

impl SensorSimulator {
    /// Simulator seeded from entropy.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Simulator with a fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            temperature: 22.0,
            humidity: 50,
            light_level: 400,
            occupancy: true,
        }
    }

    /// Advance the walk one step and emit a snapshot.
    pub fn next_snapshot(&mut self) -> SensorSnapshot {
        self.temperature =
            round1((self.temperature + self.rng.gen_range(-0.8..=0.8)).clamp(TEMP_MIN, TEMP_MAX));
        self.humidity =
            (self.humidity + self.rng.gen_range(-3..=3)).clamp(HUMIDITY_MIN, HUMIDITY_MAX);
        self.light_level =
            (self.light_level + self.rng.gen_range(-60..=60)).clamp(LIGHT_MIN, LIGHT_MAX);
        if self.rng.gen_bool(OCCUPANCY_FLIP) {
            self.occupancy = !self.occupancy;
        }

        SensorSnapshot::new(
            self.temperature,
            self.humidity as u8,
            self.light_level,
            self.occupancy,
        )
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut a = SensorSimulator::seeded(42);
        let mut b = SensorSimulator::seeded(42);
        for _ in 0..50 {
            let (sa, sb) = (a.next_snapshot(), b.next_snapshot());
            assert_eq!(sa.temperature, sb.temperature);
            assert_eq!(sa.humidity, sb.humidity);
            assert_eq!(sa.light_level, sb.light_level);
            assert_eq!(sa.occupancy, sb.occupancy);
        }
    }

    #[test]
    fn test_readings_stay_in_range() {
        let mut sim = SensorSimulator::seeded(7);
        for _ in 0..500 {
            let s = sim.next_snapshot();
            assert!((TEMP_MIN..=TEMP_MAX).contains(&s.temperature));
            assert!((HUMIDITY_MIN as u8..=HUMIDITY_MAX as u8).contains(&s.humidity));
            assert!((LIGHT_MIN..=LIGHT_MAX).contains(&s.light_level));
        }
    }

    #[test]
    fn test_walk_moves_in_small_steps() {
        let mut sim = SensorSimulator::seeded(11);
        let mut prev = sim.next_snapshot();
        for _ in 0..100 {
            let next = sim.next_snapshot();
            assert!((next.temperature - prev.temperature).abs() <= 0.9);
            assert!((next.light_level - prev.light_level).abs() <= 60);
            prev = next;
        }
    }
}
