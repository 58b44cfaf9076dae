//! Core types and definitions for the drone route simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates, controls, commands, state snapshots, events, and constants.
//! It has no dependency on any runtime or display framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::ControlError;
