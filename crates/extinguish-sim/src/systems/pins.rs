//! Pin system: pull tracking, snap-back animation and seat following.
//!
//! Pins are measured in their extinguisher's frame, so the extinguisher's
//! pose is gathered first. A completed pull is reported to the linked
//! extinguisher through `PinPulledListener` after the query ends.

use std::collections::HashMap;

use glam::DVec3;
use hecs::World;
use tracing::warn;

use extinguish_core::components::{Extinguisher, PinLink, RigidBody};
use extinguish_core::enums::PinPhase;
use extinguish_core::events::SimEvent;
use extinguish_core::types::{ObjectId, Pose};
use extinguish_gesture::PullGesture;

use crate::arming::{ArmingState, PinPulledListener};
use crate::registry::ObjectRegistry;
use crate::systems::spray;

/// World pose of every extinguisher, keyed by id.
pub fn extinguisher_frames(world: &World) -> HashMap<ObjectId, Pose> {
    let mut query = world.query::<(&ObjectId, &Pose, &Extinguisher)>();
    query.iter().map(|(_, (id, pose, _))| (*id, *pose)).collect()
}

/// Advance every pin by one tick.
pub fn run(world: &mut World, registry: &ObjectRegistry, dt: f64, events: &mut Vec<SimEvent>) {
    let frames = extinguisher_frames(world);

    let mut pulled: Vec<(ObjectId, ObjectId)> = Vec::new();
    for (_entity, (id, pose, gesture, link, body)) in world.query_mut::<(
        &ObjectId,
        &mut Pose,
        &mut PullGesture,
        &PinLink,
        &mut RigidBody,
    )>() {
        let Some(frame) = frames.get(&link.extinguisher) else {
            warn!(pin = %id, extinguisher = %link.extinguisher, "pin linked to a missing extinguisher");
            continue;
        };

        match gesture.phase() {
            PinPhase::Tracking => {
                if gesture.track(pose.position, frame) {
                    pulled.push((*id, link.extinguisher));
                    // Out of the slot but still in hand
                    body.kinematic = false;
                    body.use_gravity = false;
                    body.velocity = DVec3::ZERO;
                }
            }
            PinPhase::Idle => match gesture.advance_snap_back(dt) {
                Some((local, finished)) => {
                    *pose = frame.compose(&local);
                    if finished {
                        events.push(SimEvent::PinSeated { pin: *id });
                    }
                }
                None => *pose = frame.compose(&gesture.seat()),
            },
            PinPhase::Pulled => {}
        }
    }

    for (pin, extinguisher) in pulled {
        events.push(SimEvent::PinPulled { pin, extinguisher });
        notify_pin_pulled(world, registry, extinguisher, events);
    }
}

/// Report a completed pull to the extinguisher's arming state.
fn notify_pin_pulled(
    world: &mut World,
    registry: &ObjectRegistry,
    extinguisher: ObjectId,
    events: &mut Vec<SimEvent>,
) {
    let Some(entity) = registry.entity(extinguisher) else {
        warn!(%extinguisher, "pulled pin belongs to an unregistered extinguisher");
        return;
    };
    let transition = match world.get::<&mut ArmingState>(entity) {
        Ok(mut arming) => {
            let listener: &mut dyn PinPulledListener = &mut *arming;
            listener.on_pin_pulled()
        }
        Err(_) => {
            warn!(%extinguisher, "pin linked to an object without arming state");
            return;
        }
    };
    spray::apply_arming_transition(world, entity, extinguisher, transition, events);
}
