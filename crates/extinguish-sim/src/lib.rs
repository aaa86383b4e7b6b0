//! Simulation engine for EXTINGUISH.
//!
//! Owns the hecs ECS world, runs the drill systems each tick,
//! and produces DrillSnapshots for the frontend.

pub mod arming;
pub mod cone;
pub mod engine;
pub mod heat;
pub mod pressure;
pub mod registry;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use extinguish_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
