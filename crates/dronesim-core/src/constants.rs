//! Simulation constants and tuning parameters.

/// Default frame rate of the live loop (Hz).
pub const FRAME_RATE: u32 = 60;

/// Upper bound on the wall-clock delta consumed by a single step (seconds).
/// Larger gaps (backgrounded windows, slow frames) are silently clamped.
pub const MAX_FRAME_DT_SECS: f64 = 0.2;

/// km/h per m/s.
pub const KMH_PER_MPS: f64 = 3.6;

// --- Kinematics ---

/// Acceleration limit at time scale 1 (m/s²). Also used as the braking limit.
pub const ACCELERATION_MPS2: f64 = 2.5;

/// Remaining distance at or below which the drone counts as arrived (meters).
pub const ARRIVAL_TOLERANCE_M: f64 = 0.5;

/// Normalized progress at or above which the drone counts as arrived.
pub const ARRIVAL_PROGRESS: f64 = 0.999;

/// Floor applied to the path length so a zero-length route never divides by zero.
pub const MIN_PATH_LENGTH_M: f64 = 1e-6;

// --- Controls ---

/// Cruise speed used until the operator picks one (km/h).
pub const DEFAULT_TARGET_SPEED_KMH: f64 = 20.0;

/// Highest accepted cruise speed (km/h). Faster requests are clamped.
pub const MAX_TARGET_SPEED_KMH: f64 = 300.0;

/// Default time acceleration factor.
pub const DEFAULT_TIME_SCALE: f64 = 1.0;

/// Lowest accepted time scale.
pub const MIN_TIME_SCALE: f64 = 1.0;

/// Highest accepted time scale.
pub const MAX_TIME_SCALE: f64 = 50.0;

// --- Battery ---

/// Charge at the start of every run (percent).
pub const BATTERY_FULL_PCT: f64 = 100.0;

/// Consumption per kilometer of ground distance (percent).
pub const BATTERY_CONSUMPTION_PCT_PER_KM: f64 = 2.0;

/// At or below this charge the drone reports `Warning`.
pub const HEALTH_WARNING_PCT: f64 = 25.0;

/// At or below this charge the drone reports `Critical`.
pub const HEALTH_CRITICAL_PCT: f64 = 15.0;

// --- Altitude ---

/// Cruise altitude above ground while flying (meters).
pub const CRUISE_ALTITUDE_M: f64 = 60.0;

// --- Geodesy ---

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

// --- Display ---

/// Minimum displacement before the trail records a new point (meters).
pub const TRAIL_MIN_DISPLACEMENT_M: f64 = 5.0;

/// Maximum number of points kept in the trail.
pub const MAX_TRAIL_POINTS: usize = 10_000;
