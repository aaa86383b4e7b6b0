//! Snapshot system: queries the ECS world and builds a complete DrillSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use extinguish_core::components::{Extinguisher, FireTarget, Nozzle, PinLink, SprayController};
use extinguish_core::enums::DrillPhase;
use extinguish_core::events::SimEvent;
use extinguish_core::state::*;
use extinguish_core::types::{ObjectId, Pose, SimTime};
use extinguish_gesture::PullGesture;

use crate::arming::ArmingState;
use crate::heat::HeatState;
use crate::pressure::PressureResource;

/// Build a complete DrillSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: DrillPhase,
    events: Vec<SimEvent>,
    completion_secs: Option<f64>,
) -> DrillSnapshot {
    let extinguishers = build_extinguishers(world);
    let fires = build_fires(world);

    let score = ScoreView {
        fires_total: fires.len() as u32,
        fires_out: fires.iter().filter(|f| f.is_out).count() as u32,
        spray_secs: total_spray_secs(world),
        completion_secs,
    };

    DrillSnapshot {
        time: *time,
        phase,
        extinguishers,
        pins: build_pins(world),
        fires,
        events,
        score,
    }
}

/// HUD readout for a tank. Visible only while the extinguisher is held.
pub fn pressure_gauge(pressure: &PressureResource, held: bool) -> PressureGauge {
    PressureGauge {
        visible: held,
        fill: pressure.level01(),
        label: format!("{:.0}/{:.0}", pressure.current(), pressure.capacity()),
    }
}

fn build_extinguishers(world: &World) -> Vec<ExtinguisherView> {
    let mut query = world.query::<(
        &ObjectId,
        &Extinguisher,
        &Pose,
        &Nozzle,
        &PressureResource,
        &ArmingState,
        &SprayController,
    )>();

    let mut views: Vec<ExtinguisherView> = query
        .iter()
        .map(|(_, (id, _, pose, nozzle, pressure, arming, controller))| {
            let prompt = arming.prompt();
            ExtinguisherView {
                id: *id,
                pose: *pose,
                nozzle_origin: pose.transform_point(nozzle.offset),
                nozzle_forward: pose
                    .transform_direction(nozzle.forward)
                    .normalize_or_zero(),
                held: arming.is_held(),
                pin_pulled: arming.is_pin_pulled(),
                armed: arming.is_armed(),
                trigger_held: controller.trigger_held,
                spraying: controller.spraying,
                prompt,
                prompt_text: prompt.text().to_string(),
                pressure: pressure.current(),
                capacity: pressure.capacity(),
                pressure01: pressure.level01(),
                emission_rate: controller.emission_rate,
                gauge: pressure_gauge(pressure, arming.is_held()),
            }
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_pins(world: &World) -> Vec<PinView> {
    let mut query = world.query::<(&ObjectId, &Pose, &PullGesture, &PinLink)>();

    let mut views: Vec<PinView> = query
        .iter()
        .map(|(_, (id, pose, gesture, link))| {
            let sample = gesture.sample();
            PinView {
                id: *id,
                extinguisher: link.extinguisher,
                phase: gesture.phase(),
                held: gesture.is_held(),
                position: pose.position,
                progress01: sample.progress01,
                signed_distance: sample.signed_distance,
                lateral_offset: sample.lateral_offset,
                snapping_back: gesture.is_snapping_back(),
            }
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_fires(world: &World) -> Vec<FireView> {
    let mut query = world.query::<(&ObjectId, &FireTarget, &Pose, &HeatState)>();

    let mut views: Vec<FireView> = query
        .iter()
        .map(|(_, (id, _, pose, heat))| FireView {
            id: *id,
            position: pose.position,
            heat: heat.heat(),
            max_heat: heat.max_heat(),
            heat01: heat.fraction(),
            is_out: heat.is_out(),
            effects: heat.effects(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn total_spray_secs(world: &World) -> f64 {
    world
        .query::<&SprayController>()
        .iter()
        .map(|(_, controller)| controller.spray_secs)
        .sum()
}
