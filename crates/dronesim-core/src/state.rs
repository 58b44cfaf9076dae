//! Drone state snapshot: the complete visible state sent to the display each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{DroneHealth, DroneStatus};
use crate::events::DroneEvent;
use crate::types::{Controls, LatLng, SimTime};

/// Immutable view of the simulation, re-emitted every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DroneSnapshot {
    pub time: SimTime,
    pub status: DroneStatus,
    pub health: DroneHealth,
    pub position: LatLng,
    /// Normalized distance traveled, in [0, 1].
    pub progress: f64,
    pub distance_traveled_m: f64,
    pub total_distance_m: f64,
    pub remaining_m: f64,
    pub current_speed_mps: f64,
    pub current_speed_kmh: f64,
    /// Seconds to arrival. `None` until the drone has moved in this run.
    pub eta_secs: Option<f64>,
    /// Simulated seconds spent running.
    pub elapsed_run_secs: f64,
    pub altitude_m: f64,
    pub battery_pct: f64,
    pub controls: Controls,
    pub route: RouteView,
    /// Events raised since the previous tick.
    pub events: Vec<DroneEvent>,
}

/// Route endpoints for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub start: LatLng,
    pub end: LatLng,
}
