//! Bounded trend memory over sensor metrics.
//!
//! Each metric keeps the last [`TREND_WINDOW`] samples in a FIFO ring. The
//! trend is the mean of consecutive deltas, a first-difference slope
//! estimate rather than a regression.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use hearth_core::config::TREND_WINDOW;
use hearth_core::snapshot::SensorSnapshot;

/// FIFO ring of recent samples for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleWindow {
    /// Create a window retaining up to `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest when full.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of consecutive deltas over the window; 0.0 with fewer than two
    /// samples.
    pub fn trend(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        let delta_sum: f64 = self
            .samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .map(|(prev, next)| next - prev)
            .sum();
        delta_sum / (self.samples.len() - 1) as f64
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(TREND_WINDOW)
    }
}

/// Per-metric trend memory consumed by the decision engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendMemory {
    temperature: SampleWindow,
    light: SampleWindow,
    occupancy: SampleWindow,
}

impl TrendMemory {
    /// Create empty trend memory with the stock window size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one snapshot's readings. Occupancy is stored as 0/1.
    pub fn observe(&mut self, snapshot: &SensorSnapshot) {
        self.temperature.push(snapshot.temperature);
        self.light.push(snapshot.light_level as f64);
        self.occupancy.push(if snapshot.occupancy { 1.0 } else { 0.0 });
    }

    /// Temperature trend in °C per tick.
    pub fn temperature_trend(&self) -> f64 {
        self.temperature.trend()
    }

    /// Light-level trend in lumens per tick.
    pub fn light_trend(&self) -> f64 {
        self.light.trend()
    }

    /// The temperature window.
    pub fn temperature(&self) -> &SampleWindow {
        &self.temperature
    }

    /// The light-level window.
    pub fn light(&self) -> &SampleWindow {
        &self.light
    }

    /// The occupancy window (samples are 0.0 or 1.0).
    pub fn occupancy(&self) -> &SampleWindow {
        &self.occupancy
    }
}
