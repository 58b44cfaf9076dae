//! Frame loop thread. Steps the engine at a fixed frame rate with the
//! measured wall-clock delta and publishes snapshots.
//!
//! The engine is moved into the thread, which owns it exclusively. Commands
//! arrive via `mpsc` channel. Snapshots are sent to an optional subscriber
//! and stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use dronesim_core::state::DroneSnapshot;
use dronesim_sim::SimulationEngine;

use crate::state::{LoopCommand, LoopHandle};

/// Nominal duration of one frame at `frame_rate_hz` (at least 1 Hz).
pub fn frame_duration(frame_rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(frame_rate_hz.max(1)))
}

/// Spawns the frame loop in a new thread.
///
/// Returns the handle used to send commands, poll the latest snapshot and
/// stop the loop.
pub fn spawn_sim_loop(
    engine: SimulationEngine,
    frame_rate_hz: u32,
    snapshot_tx: Option<mpsc::Sender<DroneSnapshot>>,
) -> io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("dronesim-frame-loop".into())
        .spawn(move || {
            run_sim_loop(engine, frame_rate_hz, cmd_rx, snapshot_tx, &shared);
        })?;

    Ok(LoopHandle::new(cmd_tx, latest_snapshot, thread))
}

/// The frame loop. Runs until Shutdown command or channel disconnect.
fn run_sim_loop(
    mut engine: SimulationEngine,
    frame_rate_hz: u32,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut snapshot_tx: Option<mpsc::Sender<DroneSnapshot>>,
    latest_snapshot: &Mutex<Option<DroneSnapshot>>,
) {
    let frame = frame_duration(frame_rate_hz);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    info!(frame_rate_hz, "frame loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Drone(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "frame loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame by the measured delta (the engine clamps it)
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;
        let snapshot = engine.tick(dt.as_secs_f64());

        // 3. Publish to the subscriber; forget it once it hangs up
        if let Some(tx) = &snapshot_tx {
            if tx.send(snapshot.clone()).is_err() {
                debug!("snapshot subscriber disconnected");
                snapshot_tx = None;
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind, skip the catch-up
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronesim_core::commands::DroneCommand;
    use dronesim_core::enums::DroneStatus;
    use dronesim_core::types::LatLng;
    use dronesim_geo::destination;
    use dronesim_sim::SimConfig;

    fn test_engine(length_m: f64) -> SimulationEngine {
        let start = LatLng::new(37.6568, 27.3660);
        SimulationEngine::new(SimConfig::default(), start, destination(start, 0.0, length_m))
            .unwrap()
    }

    #[test]
    fn test_frame_duration() {
        // 60Hz = 16.666ms per frame
        assert_eq!(frame_duration(60).as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Drone(DroneCommand::Start)).unwrap();
        tx.send(LoopCommand::Drone(DroneCommand::Pause)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], LoopCommand::Drone(DroneCommand::Start)));
        assert!(matches!(commands[1], LoopCommand::Drone(DroneCommand::Pause)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_publishes_and_stops() {
        let (snap_tx, snap_rx) = mpsc::channel();
        let mut handle = spawn_sim_loop(test_engine(1000.0), 200, Some(snap_tx)).unwrap();
        handle.send(DroneCommand::Start).unwrap();

        let mut moving = None;
        for _ in 0..500 {
            let snap = snap_rx.recv_timeout(Duration::from_secs(2)).unwrap();
            if snap.distance_traveled_m > 0.0 {
                moving = Some(snap);
                break;
            }
        }
        let moving = moving.expect("drone should start moving");
        assert_eq!(moving.status, DroneStatus::EnRoute);
        assert!(handle.latest().is_some());

        handle.stop();
        assert!(!handle.is_running());
        // Stopping twice is harmless and further commands report the stop.
        handle.stop();
        assert!(handle.send(DroneCommand::Pause).is_err());
    }

    #[test]
    fn test_loop_survives_subscriber_hangup() {
        let (snap_tx, snap_rx) = mpsc::channel();
        let mut handle = spawn_sim_loop(test_engine(1000.0), 200, Some(snap_tx)).unwrap();
        snap_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        drop(snap_rx);

        std::thread::sleep(Duration::from_millis(50));
        assert!(handle.is_running());
        handle.send(DroneCommand::Start).unwrap();
        handle.stop();
    }
}
