//! Drill state snapshot: the complete read-only state published each tick.
//!
//! The effects/HUD layer renders from these views; it never reaches into
//! the simulation directly.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{DrillPhase, PinPhase, Prompt};
use crate::events::SimEvent;
use crate::types::{ObjectId, Pose, SimTime};

/// Complete drill state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillSnapshot {
    pub time: SimTime,
    pub phase: DrillPhase,
    pub extinguishers: Vec<ExtinguisherView>,
    pub pins: Vec<PinView>,
    pub fires: Vec<FireView>,
    /// Events emitted during this tick, in order.
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

impl DrillSnapshot {
    pub fn extinguisher(&self, id: ObjectId) -> Option<&ExtinguisherView> {
        self.extinguishers.iter().find(|e| e.id == id)
    }

    pub fn pin(&self, id: ObjectId) -> Option<&PinView> {
        self.pins.iter().find(|p| p.id == id)
    }

    pub fn fire(&self, id: ObjectId) -> Option<&FireView> {
        self.fires.iter().find(|f| f.id == id)
    }
}

/// One extinguisher as seen by the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtinguisherView {
    pub id: ObjectId,
    pub pose: Pose,
    /// Nozzle tip in world space.
    pub nozzle_origin: DVec3,
    /// Spray axis in world space.
    pub nozzle_forward: DVec3,
    pub held: bool,
    pub pin_pulled: bool,
    pub armed: bool,
    pub trigger_held: bool,
    pub spraying: bool,
    pub prompt: Prompt,
    pub prompt_text: String,
    pub pressure: f64,
    pub capacity: f64,
    /// `pressure / capacity`.
    pub pressure01: f64,
    /// Spray particle emission rate.
    pub emission_rate: f64,
    pub gauge: PressureGauge,
}

/// Fill-bar readout of the pressure tank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PressureGauge {
    /// Shown only while the extinguisher is held.
    pub visible: bool,
    /// Fill fraction 0..1.
    pub fill: f64,
    /// `"current/max"`, rounded.
    pub label: String,
}

/// One safety pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinView {
    pub id: ObjectId,
    pub extinguisher: ObjectId,
    pub phase: PinPhase,
    pub held: bool,
    pub position: DVec3,
    pub progress01: f64,
    pub signed_distance: f64,
    pub lateral_offset: f64,
    pub snapping_back: bool,
}

/// One fire target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireView {
    pub id: ObjectId,
    pub position: DVec3,
    pub heat: f64,
    pub max_heat: f64,
    /// `heat / max_heat`.
    pub heat01: f64,
    pub is_out: bool,
    pub effects: FireEffects,
}

/// Effect intensities derived linearly from a fire's heat fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireEffects {
    /// Particle emission rate.
    pub emission_rate: f64,
    /// Particle start size (meters).
    pub particle_size: f64,
    pub light_intensity: f64,
    pub audio_volume: f64,
}

/// Running drill score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub fires_total: u32,
    pub fires_out: u32,
    /// Seconds of spray across all extinguishers.
    pub spray_secs: f64,
    /// Drill time at completion.
    pub completion_secs: Option<f64>,
}
