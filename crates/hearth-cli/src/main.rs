//! Command-line interface for the Hearth household controller.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use hearth_cli::{Controller, SensorSimulator};
use hearth_core::config::ControllerConfig;
use hearth_core::decision::DeviceAction;
use hearth_core::journal::LogEntry;
use hearth_core::locks::ManualLockSet;
use hearth_devices::{DeviceKind, DeviceRegistry};

/// Hearth - rule-based household automation with policy gating.
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the control loop against simulated sensors.
    Run {
        /// Seconds between ticks (overrides HEARTH_TICK_SECS).
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many ticks; run until ctrl-c when omitted.
        #[arg(long)]
        ticks: Option<u64>,
        /// Fixed simulator seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
        /// Engage a manual lock at startup (repeatable).
        #[arg(long = "lock", value_name = "DEVICE_ID")]
        locks: Vec<String>,
    },
    /// Print the device catalog and exit.
    Devices,
}

/// Operator console input, one line per command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleOp {
    /// `lock <id>`: hold a device away from automation.
    Lock(String),
    /// `release <id>`: hand a device back to automation.
    Release(String),
    /// `on <id>` / `off <id>`: manual action (locks map to unlock/lock).
    Manual { device_id: String, engage: bool },
    /// `devices`: print the catalog.
    Devices,
    /// `quit`: stop the loop.
    Quit,
}

fn parse_console_line(line: &str) -> Option<ConsoleOp> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let arg = parts.next();
    match (verb, arg) {
        ("lock", Some(id)) => Some(ConsoleOp::Lock(id.to_string())),
        ("release", Some(id)) => Some(ConsoleOp::Release(id.to_string())),
        ("on", Some(id)) => Some(ConsoleOp::Manual {
            device_id: id.to_string(),
            engage: true,
        }),
        ("off", Some(id)) => Some(ConsoleOp::Manual {
            device_id: id.to_string(),
            engage: false,
        }),
        ("devices", None) => Some(ConsoleOp::Devices),
        ("quit", None) | ("exit", None) => Some(ConsoleOp::Quit),
        _ => None,
    }
}

/// Map an operator on/off intent onto the device's action domain.
fn manual_action(registry: &DeviceRegistry, device_id: &str, engage: bool) -> Option<DeviceAction> {
    registry.get(device_id).map(|device| match (device.kind, engage) {
        (DeviceKind::Lock, true) => DeviceAction::Unlocked,
        (DeviceKind::Lock, false) => DeviceAction::Locked,
        (_, true) => DeviceAction::On,
        (_, false) => DeviceAction::Off,
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hearth=debug" } else { "hearth=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ControllerConfig::from_env()?;

    match args.command {
        Command::Run {
            interval,
            ticks,
            seed,
            locks,
        } => {
            let config = match interval {
                Some(secs) => config.with_tick_secs(secs),
                None => config,
            };
            run_loop(config, ticks, seed, locks).await
        }
        Command::Devices => {
            print_catalog();
            Ok(())
        }
    }
}

fn print_catalog() {
    let registry = DeviceRegistry::with_default_catalog();
    println!("{:<15} {:<22} {:<8} {:<10} {:>9}", "ID", "NAME", "KIND", "STATE", "POWER (W)");
    for device in registry.devices() {
        println!(
            "{:<15} {:<22} {:<8} {:<10} {:>9}",
            device.id,
            device.name,
            device.kind.to_string(),
            device.state.to_string(),
            device.power_watts,
        );
    }
}

/// Spawn the operator console reader.
///
/// Lock toggles are written straight into the shared lock set so they are
/// never lost and take effect by the next tick; everything else is queued
/// for the loop, which owns the controller.
fn spawn_console(
    locks: Arc<RwLock<ManualLockSet>>,
    tx: mpsc::UnboundedSender<ConsoleOp>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_console_line(&line) {
                Some(ConsoleOp::Lock(id)) => {
                    locks.write().await.engage(id.as_str());
                    info!(device_id = %id, "manual lock engaged");
                }
                Some(ConsoleOp::Release(id)) => {
                    locks.write().await.release(&id);
                    info!(device_id = %id, "device released to automation");
                }
                Some(op) => {
                    let quit = op == ConsoleOp::Quit;
                    let _ = tx.send(op);
                    if quit {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!(input = %line, "unrecognized console command"),
            }
        }
    })
}

async fn run_loop(
    config: ControllerConfig,
    ticks: Option<u64>,
    seed: Option<u64>,
    initial_locks: Vec<String>,
) -> Result<()> {
    let mut lock_set = ManualLockSet::new();
    for device_id in &initial_locks {
        lock_set.engage(device_id.as_str());
    }
    let locks = Arc::new(RwLock::new(lock_set));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _console = spawn_console(locks.clone(), tx);

    let mut controller = Controller::new(&config);
    let mut simulator = match seed {
        Some(seed) => SensorSimulator::seeded(seed),
        None => SensorSimulator::new(),
    };

    let mut interval = tokio::time::interval(config.tick_interval());
    let mut completed = 0u64;

    info!(
        tick_secs = config.tick_secs,
        power_limit_watts = config.power_limit_watts,
        "control loop started (console: lock/release/on/off <id>, devices, quit)"
    );

    'ticks: loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("ctrl-c received; shutting down");
                break;
            }
        }

        // Drain operator commands queued since the last tick.
        while let Ok(op) = rx.try_recv() {
            match op {
                ConsoleOp::Manual { device_id, engage } => {
                    match manual_action(controller.registry(), &device_id, engage) {
                        Some(action) => match controller.manual_apply(&device_id, action) {
                            Ok(message) => {
                                locks.write().await.engage(device_id.as_str());
                                info!(%message, "manual override");
                            }
                            Err(e) => {
                                warn!(device_id = %device_id, error = %e, "manual override failed")
                            }
                        },
                        None => warn!(device_id = %device_id, "unknown device"),
                    }
                }
                ConsoleOp::Devices => print_catalog(),
                ConsoleOp::Quit => {
                    info!("operator quit");
                    break 'ticks;
                }
                // Lock toggles are handled by the console task itself.
                ConsoleOp::Lock(_) | ConsoleOp::Release(_) => {}
            }
        }

        let snapshot = simulator.next_snapshot();
        let lock_view = locks.read().await.clone();
        let entry = controller.tick(snapshot, &lock_view);

        let recent: Vec<&LogEntry> = controller.journal().recent(5).collect();
        println!(
            "{}",
            hearth_cli::dashboard::render(
                &entry,
                &controller.registry().snapshot(),
                &lock_view,
                controller.registry().energy_usage(),
                &recent,
            )
        );

        completed += 1;
        if let Some(limit) = ticks {
            if completed >= limit {
                info!(completed, "tick limit reached");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_console_line() {
        assert_eq!(
            parse_console_line("lock ac_main"),
            Some(ConsoleOp::Lock("ac_main".to_string()))
        );
        assert_eq!(
            parse_console_line("  release  heater_main "),
            Some(ConsoleOp::Release("heater_main".to_string()))
        );
        assert_eq!(
            parse_console_line("on lights_living"),
            Some(ConsoleOp::Manual {
                device_id: "lights_living".to_string(),
                engage: true,
            })
        );
        assert_eq!(parse_console_line("devices"), Some(ConsoleOp::Devices));
        assert_eq!(parse_console_line("quit"), Some(ConsoleOp::Quit));
        assert_eq!(parse_console_line("lock"), None);
        assert_eq!(parse_console_line("dance"), None);
        assert_eq!(parse_console_line(""), None);
    }

    #[test]
    fn test_manual_action_maps_lock_verbs() {
        let registry = DeviceRegistry::with_default_catalog();
        assert_eq!(
            manual_action(&registry, "smart_lock", true),
            Some(DeviceAction::Unlocked)
        );
        assert_eq!(
            manual_action(&registry, "smart_lock", false),
            Some(DeviceAction::Locked)
        );
        assert_eq!(
            manual_action(&registry, "heater_main", true),
            Some(DeviceAction::On)
        );
        assert_eq!(manual_action(&registry, "garage_door", true), None);
    }
}
