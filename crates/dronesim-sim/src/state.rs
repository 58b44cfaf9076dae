//! Mutable run state owned by the engine.

use serde::{Deserialize, Serialize};

use dronesim_core::constants::BATTERY_FULL_PCT;
use dronesim_core::enums::{DroneHealth, DroneStatus};
use dronesim_core::types::LatLng;
use dronesim_geo::GeoLine;

/// Kinematic state of the drone for the current run.
///
/// Replaced wholesale by [`crate::step::step`] every tick; nothing else
/// writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Ground distance covered, in [0, path length].
    pub distance_traveled_m: f64,
    pub current_speed_mps: f64,
    /// Simulated seconds spent running (wall-clock scaled by time scale).
    pub elapsed_run_secs: f64,
    pub position: LatLng,
    pub status: DroneStatus,
    pub battery_pct: f64,
    pub health: DroneHealth,
    /// Wall-clock seconds to arrival at the current speed.
    pub eta_secs: Option<f64>,
    pub altitude_m: f64,
}

impl SimulationState {
    /// Zeroed state at the start of `path`.
    pub fn initial(path: &GeoLine, status: DroneStatus, altitude_m: f64) -> Self {
        Self {
            distance_traveled_m: 0.0,
            current_speed_mps: 0.0,
            elapsed_run_secs: 0.0,
            position: path.start(),
            status,
            battery_pct: BATTERY_FULL_PCT,
            health: DroneHealth::Nominal,
            eta_secs: None,
            altitude_m,
        }
    }
}
