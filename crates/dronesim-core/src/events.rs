//! Events emitted by the simulation for display feedback.

use serde::{Deserialize, Serialize};

use crate::enums::DroneHealth;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DroneEvent {
    /// Left the start point.
    Departed,
    /// Reached the end of the route.
    Arrived { elapsed_run_secs: f64 },
    /// Battery crossed a health threshold.
    HealthChanged {
        health: DroneHealth,
        battery_pct: f64,
    },
    /// Run was reset to `Idle`.
    RunReset,
    /// Route endpoints changed; the run restarted.
    RouteChanged { total_distance_m: f64 },
}
