//! Fundamental geographic and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TARGET_SPEED_KMH, DEFAULT_TIME_SCALE};
use crate::error::ControlError;

/// Geographic coordinate in degrees (WGS84 latitude/longitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that the coordinate is finite and inside the valid degree ranges.
    pub fn validate(self) -> Result<Self, ControlError> {
        let valid = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if valid {
            Ok(self)
        } else {
            Err(ControlError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

/// Operator controls, read by the engine on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Whether propulsion is commanded.
    pub running: bool,
    /// Desired cruise speed (km/h).
    pub target_speed_kmh: f64,
    /// Simulated seconds per wall-clock second.
    pub time_scale: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            running: false,
            target_speed_kmh: DEFAULT_TARGET_SPEED_KMH,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

/// Frame time tracking for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames stepped since the run started.
    pub tick: u64,
    /// Bounded wall-clock seconds consumed since the run started.
    pub wall_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.wall_secs += dt;
    }
}
