//! Spray system: pressure bookkeeping and cone extinguishing.
//!
//! Per extinguisher and tick: a running jet consumes pressure first. If that
//! empties the tank the jet stops with no hit this tick. Otherwise the cone
//! is queried from the nozzle and every fire hit loses `dps * weight * dt`
//! heat. Idle extinguishers recharge instead.

use hecs::{Entity, World};
use tracing::{debug, warn};

use extinguish_core::components::{Nozzle, SprayController};
use extinguish_core::config::ExtinguisherConfig;
use extinguish_core::enums::SprayStopReason;
use extinguish_core::events::SimEvent;
use extinguish_core::types::{lerp, LayerMask, ObjectId, Pose};

use crate::arming::ArmingTransition;
use crate::cone::{self, ConeQuery};
use crate::heat::{HeatChange, HeatState};
use crate::pressure::PressureResource;
use crate::registry::ObjectRegistry;
use crate::spatial::WorldSpatial;

/// Start the jet if the extinguisher is armed and has pressure left.
/// Returns true if spraying started.
pub fn start_spray(
    id: ObjectId,
    controller: &mut SprayController,
    pressure: &mut PressureResource,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !controller.enabled || controller.spraying || pressure.is_depleted() {
        return false;
    }
    controller.spraying = true;
    pressure.set_active(true);
    events.push(SimEvent::SprayStarted { extinguisher: id });
    debug!(extinguisher = %id, pressure = pressure.current(), "spray started");
    true
}

/// Stop a running jet. Returns false if it was not spraying.
pub fn stop_spray(
    id: ObjectId,
    controller: &mut SprayController,
    pressure: &mut PressureResource,
    reason: SprayStopReason,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !controller.spraying {
        return false;
    }
    controller.spraying = false;
    controller.emission_rate = 0.0;
    pressure.set_active(false);
    events.push(SimEvent::SprayStopped {
        extinguisher: id,
        reason,
    });
    debug!(extinguisher = %id, ?reason, "spray stopped");
    true
}

/// Carry an arming transition over to the extinguisher's sprayer: arming
/// unlocks the trigger, disarming stops the jet and locks it again.
pub fn apply_arming_transition(
    world: &mut World,
    entity: Entity,
    id: ObjectId,
    transition: ArmingTransition,
    events: &mut Vec<SimEvent>,
) {
    match transition.armed_changed() {
        Some(true) => {
            if let Ok(controller) = world.query_one_mut::<&mut SprayController>(entity) {
                controller.enabled = true;
            }
            events.push(SimEvent::Armed { extinguisher: id });
            debug!(extinguisher = %id, "armed");
        }
        Some(false) => {
            if let Ok((controller, pressure)) =
                world.query_one_mut::<(&mut SprayController, &mut PressureResource)>(entity)
            {
                stop_spray(id, controller, pressure, SprayStopReason::Disarmed, events);
                controller.enabled = false;
                controller.trigger_held = false;
            }
            events.push(SimEvent::Disarmed { extinguisher: id });
            debug!(extinguisher = %id, "disarmed");
        }
        None => {}
    }

    if let Some(prompt) = transition.prompt_changed() {
        events.push(SimEvent::PromptChanged {
            extinguisher: id,
            prompt,
        });
    }
}

/// One jet that survived pressure consumption this tick.
struct Shot {
    extinguisher: ObjectId,
    cone: ConeQuery,
    level01: f64,
}

/// Run pressure and extinguishing for every extinguisher.
pub fn run(
    world: &mut World,
    registry: &ObjectRegistry,
    config: &ExtinguisherConfig,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let dt = dt.max(0.0);

    // Pass 1: pressure, collect live jets
    let mut shots = Vec::new();
    for (_entity, (id, pose, nozzle, pressure, controller)) in world.query_mut::<(
        &ObjectId,
        &Pose,
        &Nozzle,
        &mut PressureResource,
        &mut SprayController,
    )>() {
        if !controller.spraying {
            pressure.recharge(dt);
            continue;
        }

        controller.spray_secs += dt;
        if pressure.consume(dt) {
            stop_spray(*id, controller, pressure, SprayStopReason::Depleted, events);
            continue;
        }

        let level01 = pressure.level01();
        controller.emission_rate = lerp(config.emission_min, config.emission_max, level01);
        shots.push(Shot {
            extinguisher: *id,
            cone: ConeQuery {
                origin: pose.transform_point(nozzle.offset),
                forward: pose.transform_direction(nozzle.forward),
                range: config.range,
                half_angle_deg: config.half_angle_deg,
            },
            level01,
        });
    }

    if shots.is_empty() {
        return;
    }

    // Pass 2: cone queries (read-only)
    let mut hits: Vec<(ObjectId, ObjectId, f64)> = Vec::new();
    {
        let spatial = WorldSpatial::new(world);
        for shot in &shots {
            let scale = if config.scale_damage_with_pressure {
                shot.level01
            } else {
                1.0
            };
            let cone_hits = cone::query_hits(
                &spatial,
                &shot.cone,
                &config.falloff,
                LayerMask::FIRE,
                |candidate| candidate.owner.is_some(),
            );
            for hit in cone_hits {
                if let Some(owner) = hit.candidate.owner {
                    hits.push((shot.extinguisher, owner, config.dps * hit.weight * dt * scale));
                }
            }
        }
    }

    // Pass 3: apply heat loss to the owning fires
    for (extinguisher, fire, amount) in hits {
        let Some(entity) = registry.entity(fire) else {
            warn!(%fire, "spray hit a collider whose owner is not registered");
            continue;
        };
        let Ok(mut heat) = world.get::<&mut HeatState>(entity) else {
            continue;
        };
        if heat.apply_extinguish(amount) == HeatChange::Extinguished {
            events.push(SimEvent::FireExtinguished { fire });
            debug!(%fire, %extinguisher, "fire extinguished");
        }
    }
}
