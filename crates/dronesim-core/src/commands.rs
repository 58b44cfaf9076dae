//! Operator commands sent from the display layer to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::LatLng;

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DroneCommand {
    /// Command propulsion on.
    Start,
    /// Command propulsion off. Progress is kept.
    Pause,
    /// Return to the zeroed `Idle` state on the current route.
    Reset,
    /// Set the cruise speed (km/h).
    SetSpeed { kmh: f64 },
    /// Set the time acceleration factor.
    SetTimeScale { scale: f64 },
    /// Replace the route endpoints. Restarts the run.
    SetRoute { start: LatLng, end: LatLng },
}
