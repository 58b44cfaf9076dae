//! Headless runner for the drone route simulation.
//!
//! This crate drives the engine in real time on a frame-loop thread, plays
//! the display collaborator's bookkeeping (trail sampling), and loads the
//! runtime configuration used by the `dronesim` binary.

pub mod config;
pub mod sim_loop;
pub mod state;
pub mod trail;

pub use dronesim_core as core;
