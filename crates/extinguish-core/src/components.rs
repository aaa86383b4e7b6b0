//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Stateful models with behavior (pressure, heat, arming, pull gesture)
//! live in the sim and gesture crates.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ColliderShape;
use crate::types::{LayerMask, ObjectId};

/// Marks an entity as a hand-held extinguisher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Extinguisher;

/// Marks an entity as a fire target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireTarget;

/// Marks an entity as a safety pin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pin;

/// Spray nozzle, expressed in the extinguisher's local frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Nozzle {
    /// Tip position relative to the extinguisher pose.
    pub offset: DVec3,
    /// Spray axis relative to the extinguisher pose.
    pub forward: DVec3,
}

/// Trigger and spray flags for one extinguisher.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SprayController {
    /// True while armed. Trigger input is ignored otherwise.
    pub enabled: bool,
    /// Trigger currently pressed.
    pub trigger_held: bool,
    /// Jet currently running.
    pub spraying: bool,
    /// Current particle emission rate (0 when not spraying).
    pub emission_rate: f64,
    /// Total seconds spent spraying.
    pub spray_secs: f64,
}

/// Links a pin to the extinguisher it arms. One-way: the extinguisher
/// holds no reference back to the pin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinLink {
    pub extinguisher: ObjectId,
}

/// Marks a collider entity that belongs to another object (e.g. a child
/// collider of a fire). Hits resolve to the parent's state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Parent(pub ObjectId);

/// Collision shape and layer for spatial queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    pub layer: LayerMask,
}

/// Simple rigid body for pins and loose props.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    pub velocity: DVec3,
    /// Mass in kg. Always positive.
    pub mass: f64,
    /// Kinematic bodies are moved by poses only, never by forces.
    pub kinematic: bool,
    pub use_gravity: bool,
}
