//! Events emitted by the simulation for audio, effects and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Prompt, SprayStopReason};
use crate::types::ObjectId;

/// Notification produced during a tick. Collected into the tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Extinguisher picked up.
    Grabbed { extinguisher: ObjectId },
    /// Extinguisher put down.
    Dropped { extinguisher: ObjectId },
    /// Held with the pin pulled: trigger now live.
    Armed { extinguisher: ObjectId },
    /// No longer armed: spray stopped and effects cleared.
    Disarmed { extinguisher: ObjectId },
    /// Prompt text changed.
    PromptChanged {
        extinguisher: ObjectId,
        prompt: Prompt,
    },
    SprayStarted { extinguisher: ObjectId },
    SprayStopped {
        extinguisher: ObjectId,
        reason: SprayStopReason,
    },
    /// Pin pull gesture completed.
    PinPulled { pin: ObjectId, extinguisher: ObjectId },
    /// Pin released before completion; animating back to its seat.
    PinSnapBack { pin: ObjectId },
    /// Snap-back animation finished.
    PinSeated { pin: ObjectId },
    /// Pulled pin released; now a free body.
    PinDropped { pin: ObjectId },
    /// Developer reset re-seated the pin.
    PinReset { pin: ObjectId },
    FireExtinguished { fire: ObjectId },
    FireReignited { fire: ObjectId, heat: f64 },
    /// Every fire is out.
    DrillComplete { elapsed_secs: f64 },
}
