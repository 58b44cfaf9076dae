//! Errors raised at the control surface.
//!
//! The step function assumes validated inputs; anything out of range is
//! rejected here before it can reach the simulation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// Cruise speed was negative or not a number.
    #[error("invalid target speed {kmh} km/h; expected a finite value >= 0")]
    InvalidSpeed { kmh: f64 },

    /// Time scale was zero, negative, or not a number.
    #[error("invalid time scale {scale}; expected a finite value > 0")]
    InvalidTimeScale { scale: f64 },

    /// Route endpoint outside the valid latitude/longitude ranges.
    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Engine tuning value out of range.
    #[error("invalid config value {field} = {value}; expected {expected}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}
