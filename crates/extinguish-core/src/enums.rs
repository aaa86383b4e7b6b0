//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{PROMPT_GRAB, PROMPT_PULL_PIN, PROMPT_READY};

/// Drill lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillPhase {
    /// World built, drill not started yet.
    #[default]
    Setup,
    /// Simulation running.
    Active,
    /// Simulation frozen; inputs still update hold/arming state.
    Paused,
    /// Every fire is out.
    Complete,
}

/// Pull-gesture state of a safety pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinPhase {
    /// Not held (seated, or snapping back to the seat).
    #[default]
    Idle,
    /// Held and being measured for pull progress.
    Tracking,
    /// Pulled out. Terminal.
    Pulled,
}

/// User-facing prompt derived from the arming state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prompt {
    #[default]
    Grab,
    PullPin,
    Ready,
}

impl Prompt {
    /// Derive the prompt from hold and pin state.
    pub fn from_state(is_held: bool, is_pin_pulled: bool) -> Self {
        match (is_held, is_pin_pulled) {
            (false, _) => Prompt::Grab,
            (true, false) => Prompt::PullPin,
            (true, true) => Prompt::Ready,
        }
    }

    /// Display text for the HUD.
    pub fn text(self) -> &'static str {
        match self {
            Prompt::Grab => PROMPT_GRAB,
            Prompt::PullPin => PROMPT_PULL_PIN,
            Prompt::Ready => PROMPT_READY,
        }
    }
}

/// Why a spray stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SprayStopReason {
    /// Player released the trigger.
    TriggerReleased,
    /// Pressure hit zero.
    Depleted,
    /// Extinguisher became disarmed (dropped, or pin reset).
    Disarmed,
}

/// Collider geometry used by spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ColliderShape {
    Sphere { radius: f64 },
    /// Box aligned with the owning pose's axes.
    Box { half_extents: [f64; 3] },
}
