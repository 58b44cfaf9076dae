//! Simulation engine. Owns the run and its controls.
//!
//! `SimulationEngine` holds the route, the operator controls and the current
//! `SimulationState`, processes queued commands, runs the step reducer and
//! produces `DroneSnapshot`s. Completely headless, so every behavior can be
//! driven with fixed time steps in tests.

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use dronesim_core::commands::DroneCommand;
use dronesim_core::constants::{MAX_TARGET_SPEED_KMH, MAX_TIME_SCALE, MIN_TIME_SCALE};
use dronesim_core::enums::DroneStatus;
use dronesim_core::events::DroneEvent;
use dronesim_core::state::DroneSnapshot;
use dronesim_core::types::{Controls, LatLng, SimTime};
use dronesim_core::ControlError;
use dronesim_geo::GeoLine;

use crate::config::SimConfig;
use crate::state::SimulationState;
use crate::step;
use crate::systems;
use crate::systems::kinematics::bounded_dt;

/// The simulation engine. Owns the route, controls and run state.
pub struct SimulationEngine {
    config: SimConfig,
    path: GeoLine,
    controls: Controls,
    state: SimulationState,
    time: SimTime,
    command_queue: VecDeque<DroneCommand>,
    events: Vec<DroneEvent>,
}

impl SimulationEngine {
    /// Create an engine on the route `start → end`, idle at the start point.
    pub fn new(config: SimConfig, start: LatLng, end: LatLng) -> Result<Self, ControlError> {
        config.validate()?;
        let path = GeoLine::new(start.validate()?, end.validate()?);
        let controls = Controls {
            running: false,
            target_speed_kmh: validate_speed(config.target_speed_kmh)?,
            time_scale: validate_time_scale(config.time_scale)?,
        };

        Ok(Self {
            config,
            path,
            controls,
            state: SimulationState::initial(&path, DroneStatus::Idle, 0.0),
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    // --- Control surface ---

    /// Command propulsion on. The next tick leaves `Idle`.
    pub fn start(&mut self) {
        self.controls.running = true;
    }

    /// Command propulsion off. Progress, battery and status are kept.
    pub fn pause(&mut self) {
        self.controls.running = false;
    }

    /// Return to the zeroed `Idle` state on the current route.
    ///
    /// Does not touch `running`: if propulsion is still commanded the next
    /// tick departs again.
    pub fn reset(&mut self) {
        self.path = GeoLine::new(self.path.start(), self.path.end());
        self.restart_run(DroneStatus::Idle);
        self.events.clear();
        self.events.push(DroneEvent::RunReset);
        debug!(total_m = self.path.length(), "run reset");
    }

    /// Set the cruise speed (km/h). Speeds above the maximum are clamped.
    pub fn set_speed(&mut self, kmh: f64) -> Result<(), ControlError> {
        self.controls.target_speed_kmh = validate_speed(kmh)?;
        Ok(())
    }

    /// Set the time acceleration factor, clamped to the supported range.
    pub fn set_time_scale(&mut self, scale: f64) -> Result<(), ControlError> {
        self.controls.time_scale = validate_time_scale(scale)?;
        Ok(())
    }

    /// Replace the route. Unchanged endpoints are a no-op; otherwise the run
    /// restarts, seeded `EnRoute` if propulsion is commanded.
    pub fn set_route(&mut self, start: LatLng, end: LatLng) -> Result<(), ControlError> {
        let (start, end) = (start.validate()?, end.validate()?);
        if start == self.path.start() && end == self.path.end() {
            return Ok(());
        }

        self.path = GeoLine::new(start, end);
        let status = if self.controls.running {
            DroneStatus::EnRoute
        } else {
            DroneStatus::Idle
        };
        self.restart_run(status);
        self.events.push(DroneEvent::RouteChanged {
            total_distance_m: self.path.length(),
        });
        debug!(total_m = self.path.length(), ?status, "route changed");
        Ok(())
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: DroneCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DroneCommand>) {
        self.command_queue.extend(commands);
    }

    // --- Stepping ---

    /// Advance the simulation by one frame of `dt_secs` wall-clock seconds and
    /// return the resulting snapshot. The delta is clamped to the configured cap.
    pub fn tick(&mut self, dt_secs: f64) -> DroneSnapshot {
        self.process_commands();

        let dt = bounded_dt(dt_secs, self.config.max_frame_dt_secs);
        if dt != dt_secs {
            trace!(requested = dt_secs, used = dt, "frame delta clamped");
        }

        let prev = self.state;
        self.state = step::step(&prev, &self.controls, &self.path, &self.config, dt);
        self.time.advance(dt);
        self.record_transitions(&prev);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.state, &self.path, &self.controls, self.time, events)
    }

    /// Current snapshot without advancing. Pending events stay queued.
    pub fn snapshot(&self) -> DroneSnapshot {
        systems::snapshot::build_snapshot(
            &self.state,
            &self.path,
            &self.controls,
            self.time,
            Vec::new(),
        )
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn path(&self) -> &GeoLine {
        &self.path
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    fn restart_run(&mut self, status: DroneStatus) {
        let altitude = if status == DroneStatus::EnRoute {
            self.config.cruise_altitude_m
        } else {
            0.0
        };
        self.state = SimulationState::initial(&self.path, status, altitude);
        self.time = SimTime::default();
    }

    /// Process all queued commands. Rejected commands are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(&command) {
                warn!(?command, %err, "rejected command");
            }
        }
    }

    fn handle_command(&mut self, command: &DroneCommand) -> Result<(), ControlError> {
        match *command {
            DroneCommand::Start => self.start(),
            DroneCommand::Pause => self.pause(),
            DroneCommand::Reset => self.reset(),
            DroneCommand::SetSpeed { kmh } => self.set_speed(kmh)?,
            DroneCommand::SetTimeScale { scale } => self.set_time_scale(scale)?,
            DroneCommand::SetRoute { start, end } => self.set_route(start, end)?,
        }
        Ok(())
    }

    /// Emit events for what changed between `prev` and the current state.
    fn record_transitions(&mut self, prev: &SimulationState) {
        let next = self.state;

        if prev.distance_traveled_m <= 0.0 && next.distance_traveled_m > 0.0 {
            info!(total_m = self.path.length(), "departed");
            self.events.push(DroneEvent::Departed);
        }
        if prev.status != DroneStatus::Arrived && next.status == DroneStatus::Arrived {
            info!(
                elapsed_secs = next.elapsed_run_secs,
                battery_pct = next.battery_pct,
                "arrived"
            );
            self.events.push(DroneEvent::Arrived {
                elapsed_run_secs: next.elapsed_run_secs,
            });
        }
        if prev.health != next.health {
            info!(health = ?next.health, battery_pct = next.battery_pct, "health changed");
            self.events.push(DroneEvent::HealthChanged {
                health: next.health,
                battery_pct: next.battery_pct,
            });
        }
    }
}

/// Reject negative or non-finite speeds and clamp the rest.
fn validate_speed(kmh: f64) -> Result<f64, ControlError> {
    if kmh.is_finite() && kmh >= 0.0 {
        Ok(kmh.min(MAX_TARGET_SPEED_KMH))
    } else {
        Err(ControlError::InvalidSpeed { kmh })
    }
}

/// Reject non-positive or non-finite scales and clamp the rest.
fn validate_time_scale(scale: f64) -> Result<f64, ControlError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE))
    } else {
        Err(ControlError::InvalidTimeScale { scale })
    }
}
