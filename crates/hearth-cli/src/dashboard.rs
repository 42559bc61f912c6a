//! Terminal dashboard rendering.
//!
//! Pure formatting: takes read-only views and returns the frame as a string
//! so the renderer is testable without capturing stdout.

use hearth_core::journal::LogEntry;
use hearth_core::locks::ManualLockSet;
use hearth_devices::DeviceSnapshot;

/// Render one dashboard frame.
pub fn render(
    entry: &LogEntry,
    devices: &DeviceSnapshot,
    locks: &ManualLockSet,
    total_power: u32,
    recent: &[&LogEntry],
) -> String {
    let mut out = String::new();
    let snapshot = &entry.snapshot;

    out.push_str("=== Hearth Household Controller ===\n");
    out.push_str(&format!(
        "Tick: {}\n\n",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("--- ENVIRONMENT ---\n");
    out.push_str(&format!(
        "  Temperature : {:>6.1} °C\n  Humidity    : {:>6} %\n  Light level : {:>6} lm\n  Occupancy   : {:>6}\n\n",
        snapshot.temperature,
        snapshot.humidity,
        snapshot.light_level,
        if snapshot.occupancy { "YES" } else { "NO" },
    ));

    out.push_str("--- DEVICES ---\n");
    out.push_str(&format!(
        "  {:<15} {:<22} {:<10} {:>9}  {:<7} {}\n",
        "ID", "NAME", "STATE", "POWER (W)", "MANUAL", "LAST CHANGED"
    ));
    for device in devices.iter() {
        let manual = if locks.is_locked(&device.id) { "YES" } else { "-" };
        let changed = device
            .last_changed
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {:<15} {:<22} {:<10} {:>9}  {:<7} {}\n",
            device.id,
            device.name,
            device.state.to_string(),
            device.power_watts,
            manual,
            changed,
        ));
    }
    out.push_str(&format!("\n  Total power draw: {} W\n\n", total_power));

    out.push_str("--- DECISION ---\n");
    out.push_str(&format!(
        "  Proposal   : {}\n  Reason     : {}\n  Policy     : {}\n  Device     : {}\n  Reflection : {}\n",
        entry.decision,
        entry.decision.reason,
        entry.verdict,
        entry.device_message,
        entry.reflection,
    ));

    if !recent.is_empty() {
        out.push_str("\n--- RECENT TICKS (newest first) ---\n");
        for past in recent {
            out.push_str(&format!(
                "  [{}] {} | {} | {}\n",
                past.timestamp.format("%H:%M:%S"),
                past.decision,
                past.verdict,
                past.device_message,
            ));
        }
    }

    out
}
