//! Per-tick computations used by the step reducer.
//!
//! Systems are pure functions over plain numbers and state. They do not own
//! state. All state lives in `SimulationState`.

pub mod battery;
pub mod kinematics;
pub mod snapshot;
