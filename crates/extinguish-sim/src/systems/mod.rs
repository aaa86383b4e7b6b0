//! ECS systems that operate on the drill world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod fires;
pub mod movement;
pub mod pins;
pub mod snapshot;
pub mod spray;
