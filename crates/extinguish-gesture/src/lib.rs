//! Safety-pin pull gesture recognition for EXTINGUISH.
//!
//! Converts per-tick hand positions into a bounded pull-progress signal,
//! and animates an unfinished pull back to its seat.
//! No ECS dependency; operates on plain data.

pub mod pull;
pub mod snap_back;

pub use extinguish_core as core;
pub use pull::{measure, PullGesture, PullSample, ReleaseOutcome};
pub use snap_back::{smoothstep, SnapBack};
