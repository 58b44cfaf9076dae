//! Speed profile and frame-delta handling.
//!
//! Bounded-acceleration model with a braking cap: the drone never flies
//! faster than the speed from which it can still stop in the remaining
//! distance, `v_stop = sqrt(2 · a · remaining)`. Both the commanded speed and
//! the acceleration limit are multiplied by the time scale, so distance is
//! integrated with the plain wall-clock delta.

use dronesim_core::constants::{ARRIVAL_PROGRESS, KMH_PER_MPS};

/// Clamp a wall-clock delta to `[0, cap]`. Non-finite deltas count as zero.
pub fn bounded_dt(dt_secs: f64, cap_secs: f64) -> f64 {
    if dt_secs.is_finite() {
        dt_secs.clamp(0.0, cap_secs.max(0.0))
    } else {
        0.0
    }
}

/// Commanded cruise speed in m/s of wall-clock time.
pub fn commanded_speed(target_speed_kmh: f64, time_scale: f64) -> f64 {
    target_speed_kmh / KMH_PER_MPS * time_scale
}

/// Acceleration limit in m/s² of wall-clock time.
pub fn acceleration_limit(base_mps2: f64, time_scale: f64) -> f64 {
    base_mps2 * time_scale
}

/// Highest speed from which the drone can stop within `remaining_m`.
pub fn stopping_speed(accel: f64, remaining_m: f64) -> f64 {
    (2.0 * accel * remaining_m.max(0.0)).sqrt()
}

/// Speed the drone should be flying at while propulsion is commanded.
pub fn desired_speed(commanded_mps: f64, accel: f64, remaining_m: f64) -> f64 {
    commanded_mps.min(stopping_speed(accel, remaining_m))
}

/// Move `current` toward `desired` by at most `max_delta`. Never negative.
pub fn approach_speed(current: f64, desired: f64, max_delta: f64) -> f64 {
    let next = if desired > current {
        (current + max_delta).min(desired)
    } else {
        (current - max_delta).max(desired)
    };
    next.max(0.0)
}

/// Arrival test on remaining distance or normalized progress.
pub fn has_arrived(remaining_m: f64, progress: f64, tolerance_m: f64) -> bool {
    remaining_m <= tolerance_m || progress >= ARRIVAL_PROGRESS
}
