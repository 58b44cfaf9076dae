//! The per-tick step reducer.
//!
//! `step` is a pure function of (previous state, controls, route, config,
//! bounded dt). It holds no state of its own, which keeps the physics
//! testable without a frame loop or a display layer.

use dronesim_core::enums::{DroneHealth, DroneStatus};
use dronesim_core::types::Controls;
use dronesim_geo::GeoLine;

use crate::config::SimConfig;
use crate::state::SimulationState;
use crate::systems::{battery, kinematics};

/// Advance `prev` by `dt` wall-clock seconds. `dt` must already be bounded.
pub fn step(
    prev: &SimulationState,
    controls: &Controls,
    path: &GeoLine,
    config: &SimConfig,
    dt: f64,
) -> SimulationState {
    // Terminal until reset or route change.
    if prev.status == DroneStatus::Arrived {
        return *prev;
    }

    let total = path.length();
    let time_scale = controls.time_scale;
    let accel = kinematics::acceleration_limit(config.acceleration_mps2, time_scale);
    let remaining = (total - prev.distance_traveled_m).max(0.0);

    // 1. Speed: ramp toward the braking-capped cruise speed, or down to rest when paused.
    let desired = if controls.running {
        let commanded = kinematics::commanded_speed(controls.target_speed_kmh, time_scale);
        kinematics::desired_speed(commanded, accel, remaining)
    } else {
        0.0
    };
    let mut speed = kinematics::approach_speed(prev.current_speed_mps, desired, accel * dt);

    // 2. Distance integration (time scale is already in the speed). Paused runs are frozen;
    // only the reported speed keeps ramping down.
    let mut distance = if controls.running {
        (prev.distance_traveled_m + speed * dt).clamp(0.0, total)
    } else {
        prev.distance_traveled_m
    };

    // 3. Status transitions.
    let mut status = next_status(prev.status, controls.running, distance);
    let arrived = status == DroneStatus::EnRoute
        && kinematics::has_arrived(
            total - distance,
            distance / total,
            config.arrival_tolerance_m,
        );
    if arrived {
        distance = total;
        speed = 0.0;
        status = DroneStatus::Arrived;
    }

    let elapsed_run_secs = if controls.running {
        prev.elapsed_run_secs + dt * time_scale
    } else {
        prev.elapsed_run_secs
    };

    // 4. ETA holds its last value while paused so the display does not flicker.
    let eta_secs = if arrived {
        Some(0.0)
    } else if controls.running && speed > 0.0 {
        Some((total - distance) / speed)
    } else {
        prev.eta_secs
    };

    let altitude_m = if arrived || status == DroneStatus::Idle {
        0.0
    } else if controls.running {
        config.cruise_altitude_m
    } else {
        prev.altitude_m
    };

    // 5. Derived values, recomputed from distance every tick.
    let battery_pct = battery::battery_pct(distance, config.battery_consumption_pct_per_km);

    debug_assert!(
        (0.0..=total).contains(&distance),
        "distance {distance} outside [0, {total}]"
    );
    debug_assert!(speed >= 0.0, "negative speed {speed}");
    debug_assert!(
        distance >= prev.distance_traveled_m,
        "distance went backwards: {} -> {distance}",
        prev.distance_traveled_m
    );

    SimulationState {
        distance_traveled_m: distance,
        current_speed_mps: speed,
        elapsed_run_secs,
        position: path.point_at_distance(distance),
        status,
        battery_pct,
        health: DroneHealth::from_battery(battery_pct),
        eta_secs,
        altitude_m,
    }
}

/// Idle/EnRoute transitions. Once any distance is covered the drone stays
/// `EnRoute` while paused; pausing freezes progress instead of resetting it.
fn next_status(prev: DroneStatus, running: bool, distance_m: f64) -> DroneStatus {
    match (prev, running) {
        (DroneStatus::Arrived, _) => DroneStatus::Arrived,
        (_, true) => DroneStatus::EnRoute,
        (_, false) if distance_m <= 0.0 => DroneStatus::Idle,
        (status, false) => status,
    }
}
