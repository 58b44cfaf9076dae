//! Snapshot system: turns the run state into a `DroneSnapshot`.
//!
//! Read-only. Never modifies the state.

use dronesim_core::constants::KMH_PER_MPS;
use dronesim_core::events::DroneEvent;
use dronesim_core::state::{DroneSnapshot, RouteView};
use dronesim_core::types::{Controls, SimTime};
use dronesim_geo::GeoLine;

use crate::state::SimulationState;

/// Build a complete snapshot from the current run state.
pub fn build_snapshot(
    state: &SimulationState,
    path: &GeoLine,
    controls: &Controls,
    time: SimTime,
    events: Vec<DroneEvent>,
) -> DroneSnapshot {
    let total = path.length();
    let remaining = (total - state.distance_traveled_m).max(0.0);

    DroneSnapshot {
        time,
        status: state.status,
        health: state.health,
        position: state.position,
        progress: (state.distance_traveled_m / total).clamp(0.0, 1.0),
        distance_traveled_m: state.distance_traveled_m,
        total_distance_m: total,
        remaining_m: remaining,
        current_speed_mps: state.current_speed_mps,
        current_speed_kmh: state.current_speed_mps * KMH_PER_MPS,
        eta_secs: state.eta_secs,
        elapsed_run_secs: state.elapsed_run_secs,
        altitude_m: state.altitude_m,
        battery_pct: state.battery_pct,
        controls: *controls,
        route: RouteView {
            start: path.start(),
            end: path.end(),
        },
        events,
    }
}
