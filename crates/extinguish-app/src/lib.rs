//! EXTINGUISH headless runner.
//!
//! Wires the simulation engine to a game-loop thread and a scripted trainee,
//! for running drills without a headset.

pub mod game_loop;
pub mod script;
pub mod state;

pub use extinguish_core as core;
