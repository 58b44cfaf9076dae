//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_CRITICAL_PCT, HEALTH_WARNING_PCT};

/// Flight status of the drone for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    /// On the ground at the start point with nothing traveled.
    #[default]
    Idle,
    /// Flying, or paused mid-route.
    EnRoute,
    /// Reached the end of the route. Terminal until reset or route change.
    Arrived,
}

/// Coarse classification of remaining battery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DroneHealth {
    #[default]
    Nominal,
    Warning,
    Critical,
}

impl DroneHealth {
    /// Classify a battery charge (percent).
    pub fn from_battery(battery_pct: f64) -> Self {
        if battery_pct <= HEALTH_CRITICAL_PCT {
            DroneHealth::Critical
        } else if battery_pct <= HEALTH_WARNING_PCT {
            DroneHealth::Warning
        } else {
            DroneHealth::Nominal
        }
    }
}
