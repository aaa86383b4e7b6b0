//! Input commands delivered by the input/grab layer.
//!
//! Commands are queued and processed synchronously at the start of the next tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, Pose};

/// Everything the outside world can tell the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputCommand {
    // --- Grab interaction ---
    /// A hand started holding an object.
    HoldBegin { object: ObjectId },
    /// A hand let go of an object.
    HoldEnd { object: ObjectId },
    /// Trigger pressed while holding an extinguisher.
    TriggerBegin { object: ObjectId },
    /// Trigger released.
    TriggerEnd { object: ObjectId },
    /// Latest world pose of a held object.
    PoseSample { object: ObjectId, pose: Pose },

    // --- Developer tools ---
    /// Re-seat a pin and clear the linked extinguisher's pin state.
    ResetPin { pin: ObjectId },
    /// Outward push on free bodies around a point.
    RadialImpulse {
        origin: DVec3,
        force: f64,
        radius: f64,
    },

    // --- Drill control ---
    /// Start the drill (builds the default layout if the world is empty).
    StartDrill,
    Pause,
    Resume,
}
