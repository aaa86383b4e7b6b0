//! Fire system: reignite timers for extinguished fires.

use hecs::World;
use tracing::debug;

use extinguish_core::events::SimEvent;
use extinguish_core::types::ObjectId;

use crate::heat::HeatState;

/// Advance every fire's reignite timer by `dt`.
pub fn run(world: &mut World, dt: f64, events: &mut Vec<SimEvent>) {
    for (_entity, (id, heat)) in world.query_mut::<(&ObjectId, &mut HeatState)>() {
        if heat.advance(dt) {
            events.push(SimEvent::FireReignited {
                fire: *id,
                heat: heat.heat(),
            });
            debug!(fire = %id, heat = heat.heat(), "fire reignited");
        }
    }
}
