//! Simulation engine for the drone route simulation.
//!
//! Owns the run state, advances it once per frame through a pure step
//! reducer, and produces `DroneSnapshot`s for the display layer.

pub mod config;
pub mod engine;
pub mod state;
pub mod step;
pub mod systems;

pub use config::SimConfig;
pub use dronesim_core as core;
pub use engine::SimulationEngine;
pub use state::SimulationState;
