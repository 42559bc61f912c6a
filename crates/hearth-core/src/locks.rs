//! Manual override locks.
//!
//! An operator can place any device under manual control. While the lock is
//! engaged the decision engine must never propose a non-idle action for that
//! device. The set is owned by the operator surface; the engine only reads it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Set of devices currently under manual control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualLockSet {
    locks: HashMap<String, bool>,
}

impl ManualLockSet {
    /// Create an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engage the manual lock for a device.
    pub fn engage(&mut self, device_id: impl Into<String>) {
        self.locks.insert(device_id.into(), true);
    }

    /// Release a device back to automation.
    pub fn release(&mut self, device_id: &str) {
        self.locks.insert(device_id.to_string(), false);
    }

    /// Whether a device is under manual control.
    pub fn is_locked(&self, device_id: &str) -> bool {
        self.locks.get(device_id).copied().unwrap_or(false)
    }

    /// IDs of all devices currently locked, in sorted order.
    pub fn locked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .locks
            .iter()
            .filter(|(_, locked)| **locked)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Whether any device is locked.
    pub fn any_locked(&self) -> bool {
        self.locks.values().any(|locked| *locked)
    }
}
