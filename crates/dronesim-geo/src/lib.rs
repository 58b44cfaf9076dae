//! Geodesy helpers for the drone route simulation.
//!
//! Great-circle length and interpolation along a fixed two-point route.

pub mod geodesic;

// Re-export key types for convenience.
pub use geodesic::{destination, haversine_distance, initial_bearing, GeoLine};
