//! Append-only tick journal.
//!
//! Every control-loop tick produces one [`LogEntry`] combining the snapshot,
//! the decision, the policy verdict, the device-update result, and the
//! reflection text. Storage is insertion-ordered; presentation is
//! most-recent-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decision::{Decision, PolicyVerdict};
use crate::snapshot::SensorSnapshot;

/// One journaled control-loop tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry ID.
    pub id: Uuid,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// Sensor readings for the tick.
    pub snapshot: SensorSnapshot,
    /// Decision made by the engine.
    pub decision: Decision,
    /// Policy verdict on the decision.
    pub verdict: PolicyVerdict,
    /// Outcome message from the device registry (or why nothing was applied).
    pub device_message: String,
    /// Post-hoc energy-efficiency narrative.
    pub reflection: String,
}

impl LogEntry {
    /// Record a tick outcome, stamped now.
    pub fn new(
        snapshot: SensorSnapshot,
        decision: Decision,
        verdict: PolicyVerdict,
        device_message: impl Into<String>,
        reflection: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            snapshot,
            decision,
            verdict,
            device_message: device_message.into(),
            reflection: reflection.into(),
        }
    }
}

/// In-memory journal of tick outcomes.
///
/// Entries are never mutated after insertion. Iteration order of
/// [`Journal::recent`] is newest first; the underlying storage keeps
/// insertion order.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Number of entries recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent entry, if any.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev().take(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DeviceAction;

    fn entry(label: &str) -> LogEntry {
        LogEntry::new(
            SensorSnapshot::default(),
            Decision::act("heater_main", DeviceAction::On, label),
            PolicyVerdict::approve("action approved"),
            "heater_main changed from OFF to ON",
            "reasonable",
        )
    }

    #[test]
    fn test_storage_is_insertion_ordered() {
        let mut journal = Journal::new();
        journal.append(entry("first"));
        journal.append(entry("second"));
        journal.append(entry("third"));

        let reasons: Vec<&str> = journal
            .entries()
            .iter()
            .map(|e| e.decision.reason.as_str())
            .collect();
        assert_eq!(reasons, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut journal = Journal::new();
        journal.append(entry("first"));
        journal.append(entry("second"));
        journal.append(entry("third"));

        let reasons: Vec<&str> = journal
            .recent(2)
            .map(|e| e.decision.reason.as_str())
            .collect();
        assert_eq!(reasons, vec!["third", "second"]);
        assert_eq!(journal.latest().unwrap().decision.reason, "third");
    }
}
