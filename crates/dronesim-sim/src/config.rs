//! Runtime tuning for the simulation engine.

use serde::{Deserialize, Serialize};

use dronesim_core::constants::*;
use dronesim_core::ControlError;

/// Configuration for a simulation engine. Missing fields take the defaults
/// from `dronesim_core::constants`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Acceleration and braking limit at time scale 1 (m/s²).
    pub acceleration_mps2: f64,
    /// Largest wall-clock delta consumed by one tick (seconds).
    pub max_frame_dt_secs: f64,
    /// Remaining distance counted as arrival (meters).
    pub arrival_tolerance_m: f64,
    /// Battery drain per kilometer of ground distance (percent).
    pub battery_consumption_pct_per_km: f64,
    /// Altitude reported while flying (meters).
    pub cruise_altitude_m: f64,
    /// Initial cruise speed (km/h).
    pub target_speed_kmh: f64,
    /// Initial time scale.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            acceleration_mps2: ACCELERATION_MPS2,
            max_frame_dt_secs: MAX_FRAME_DT_SECS,
            arrival_tolerance_m: ARRIVAL_TOLERANCE_M,
            battery_consumption_pct_per_km: BATTERY_CONSUMPTION_PCT_PER_KM,
            cruise_altitude_m: CRUISE_ALTITUDE_M,
            target_speed_kmh: DEFAULT_TARGET_SPEED_KMH,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

impl SimConfig {
    /// Check the tuning values the step reducer relies on. The initial speed
    /// and time scale are checked by the engine like any other control input.
    pub fn validate(&self) -> Result<(), ControlError> {
        positive("acceleration_mps2", self.acceleration_mps2)?;
        positive("max_frame_dt_secs", self.max_frame_dt_secs)?;
        non_negative("arrival_tolerance_m", self.arrival_tolerance_m)?;
        non_negative(
            "battery_consumption_pct_per_km",
            self.battery_consumption_pct_per_km,
        )?;
        non_negative("cruise_altitude_m", self.cruise_altitude_m)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ControlError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidConfig {
            field,
            value,
            expected: "a finite value > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ControlError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ControlError::InvalidConfig {
            field,
            value,
            expected: "a finite value >= 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_tolerance_and_drain_are_allowed() {
        let config = SimConfig {
            arrival_tolerance_m: 0.0,
            battery_consumption_pct_per_km: 0.0,
            cruise_altitude_m: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_negative_altitude_rejected() {
        let config = SimConfig {
            cruise_altitude_m: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ControlError::InvalidConfig { field: "cruise_altitude_m", .. })
        ));
    }
}
