use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dronesim_app::config::AppConfig;
use dronesim_app::sim_loop;
use dronesim_app::state::LoopCommand;
use dronesim_app::trail::TrailRecorder;
use dronesim_core::commands::DroneCommand;
use dronesim_core::enums::DroneStatus;
use dronesim_core::state::DroneSnapshot;
use dronesim_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drone route simulation runner")]
struct Cli {
    /// JSON configuration file (route, frame rate, engine tuning).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fly the route with a fixed time step as fast as possible.
    Simulate {
        #[command(flatten)]
        flight: FlightArgs,
        /// Seconds per step.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Give up after this many steps.
        #[arg(long, default_value_t = 1_000_000)]
        max_ticks: u64,
        /// Print every Nth snapshot as a JSON line (0 = summary only).
        #[arg(long, default_value_t = 60)]
        every: u64,
    },
    /// Fly the route in real time on the frame loop.
    Live {
        #[command(flatten)]
        flight: FlightArgs,
        /// Stop after this many wall-clock seconds.
        #[arg(long, default_value_t = 300.0)]
        timeout: f64,
        /// Read JSON commands (e.g. {"type":"Pause"}) from stdin, one per line.
        #[arg(long)]
        stdin_commands: bool,
    },
}

#[derive(Args, Debug)]
struct FlightArgs {
    /// Cruise speed in km/h.
    #[arg(long)]
    speed: Option<f64>,
    /// Time acceleration factor.
    #[arg(long)]
    time_scale: Option<f64>,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Simulate {
            flight,
            dt,
            max_ticks,
            every,
        } => handle_simulate(&config, &flight, dt, max_ticks, every),
        Command::Live {
            flight,
            timeout,
            stdin_commands,
        } => handle_live(&config, &flight, timeout, stdin_commands),
    }
}

fn build_engine(config: &AppConfig, flight: &FlightArgs) -> Result<SimulationEngine> {
    let mut engine = SimulationEngine::new(config.sim, config.route.start, config.route.end)
        .context("failed to create simulation engine")?;
    if let Some(kmh) = flight.speed {
        engine.set_speed(kmh)?;
    }
    if let Some(scale) = flight.time_scale {
        engine.set_time_scale(scale)?;
    }
    info!(
        total_m = engine.path().length(),
        speed_kmh = engine.controls().target_speed_kmh,
        time_scale = engine.controls().time_scale,
        "route loaded"
    );
    Ok(engine)
}

fn handle_simulate(
    config: &AppConfig,
    flight: &FlightArgs,
    dt: f64,
    max_ticks: u64,
    every: u64,
) -> Result<()> {
    if dt > config.sim.max_frame_dt_secs {
        warn!(
            dt,
            cap = config.sim.max_frame_dt_secs,
            "step larger than the frame cap; it will be clamped"
        );
    }

    let mut engine = build_engine(config, flight)?;
    let mut trail = TrailRecorder::default();
    let mut out = io::stdout().lock();
    engine.start();

    for tick in 1..=max_ticks {
        let snapshot = engine.tick(dt);
        trail.observe(&snapshot);
        let arrived = snapshot.status == DroneStatus::Arrived;
        if every > 0 && (tick % every == 0 || arrived) {
            write_json_line(&mut out, &snapshot)?;
        }
        if arrived {
            print_summary(&snapshot, &trail);
            return Ok(());
        }
    }
    bail!("drone did not arrive within {max_ticks} steps")
}

fn handle_live(
    config: &AppConfig,
    flight: &FlightArgs,
    timeout: f64,
    stdin_commands: bool,
) -> Result<()> {
    let engine = build_engine(config, flight)?;
    let (snap_tx, snap_rx) = mpsc::channel();
    let mut handle = sim_loop::spawn_sim_loop(engine, config.frame_rate_hz, Some(snap_tx))
        .context("failed to spawn frame loop")?;
    handle.send(DroneCommand::Start)?;

    if stdin_commands {
        let tx = handle.command_sender();
        std::thread::Builder::new()
            .name("dronesim-stdin".into())
            .spawn(move || forward_stdin_commands(tx))
            .context("failed to spawn stdin reader")?;
    }

    let deadline = Instant::now() + Duration::from_secs_f64(timeout.max(0.0));
    let mut trail = TrailRecorder::default();
    let mut out = io::stdout().lock();
    let mut last_print: Option<Instant> = None;
    let mut last_snapshot = None;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let snapshot = match snap_rx.recv_timeout(remaining) {
            Ok(snapshot) => snapshot,
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout, "stopped before arrival");
                break;
            }
            Err(RecvTimeoutError::Disconnected) => bail!("frame loop exited unexpectedly"),
        };

        trail.observe(&snapshot);
        let arrived = snapshot.status == DroneStatus::Arrived;
        let due = last_print.map_or(true, |t| t.elapsed() >= Duration::from_secs(1));
        if due || arrived || !snapshot.events.is_empty() {
            write_json_line(&mut out, &snapshot)?;
            last_print = Some(Instant::now());
        }
        last_snapshot = Some(snapshot);
        if arrived {
            break;
        }
    }

    handle.stop();
    if let Some(snapshot) = last_snapshot {
        print_summary(&snapshot, &trail);
    }
    Ok(())
}

/// Forward operator commands typed on stdin to the frame loop.
fn forward_stdin_commands(tx: mpsc::Sender<LoopCommand>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<DroneCommand>(line) {
            Ok(command) => {
                if tx.send(LoopCommand::Drone(command)).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, input = line, "ignoring unparseable command"),
        }
    }
}

fn write_json_line(out: &mut impl Write, snapshot: &DroneSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot).context("failed to serialize snapshot")?;
    writeln!(out)?;
    Ok(())
}

fn print_summary(snapshot: &DroneSnapshot, trail: &TrailRecorder) {
    eprintln!(
        "{:?} after {} frames: {:.1} of {:.1} m, {:.1} s flown, battery {:.1}% ({:?}), {} trail points",
        snapshot.status,
        snapshot.time.tick,
        snapshot.distance_traveled_m,
        snapshot.total_distance_m,
        snapshot.elapsed_run_secs,
        snapshot.battery_pct,
        snapshot.health,
        trail.len(),
    );
}

/// Install the global subscriber. `RUST_LOG` controls the level; defaults to `info`.
fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")
}
