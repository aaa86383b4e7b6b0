//! Entity spawn factories for setting up the drill world.
//!
//! Creates extinguishers (with their pins), fire targets, child colliders
//! and loose props with the component bundles the systems expect.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use extinguish_core::components::*;
use extinguish_core::config::{DrillConfig, FireConfig, PinConfig};
use extinguish_core::constants::*;
use extinguish_core::enums::ColliderShape;
use extinguish_core::types::{LayerMask, ObjectId, Pose};
use extinguish_gesture::PullGesture;

use crate::arming::ArmingState;
use crate::heat::HeatState;
use crate::pressure::PressureResource;
use crate::registry::ObjectRegistry;

/// Ids of a freshly spawned extinguisher and its pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtinguisherHandles {
    pub extinguisher: ObjectId,
    pub pin: ObjectId,
}

/// Set up the default drill: one extinguisher at hand height facing +z and
/// `layout.fire_count` fires spread over an arc in front of it.
pub fn setup_drill(
    world: &mut World,
    registry: &mut ObjectRegistry,
    rng: &mut ChaCha8Rng,
    config: &DrillConfig,
) -> ExtinguisherHandles {
    let handles = spawn_extinguisher(
        world,
        registry,
        Pose::from_position(DVec3::new(0.0, DRILL_EXTINGUISHER_HEIGHT, 0.0)),
        config,
    );

    let layout = &config.layout;
    let arc = layout.arc_deg.to_radians();
    for i in 0..layout.fire_count {
        let t = if layout.fire_count > 1 {
            i as f64 / (layout.fire_count - 1) as f64
        } else {
            0.5
        };
        let bearing = -arc / 2.0 + arc * t;
        let jitter = if layout.jitter > 0.0 {
            DVec3::new(
                rng.gen_range(-layout.jitter..=layout.jitter),
                0.0,
                rng.gen_range(-layout.jitter..=layout.jitter),
            )
        } else {
            DVec3::ZERO
        };
        let position = DVec3::new(
            bearing.sin() * layout.fire_distance,
            DRILL_FIRE_HEIGHT,
            bearing.cos() * layout.fire_distance,
        ) + jitter;
        spawn_fire(world, registry, position, &config.fire);
    }

    handles
}

/// Spawn an extinguisher with a full tank and its seated pin.
pub fn spawn_extinguisher(
    world: &mut World,
    registry: &mut ObjectRegistry,
    pose: Pose,
    config: &DrillConfig,
) -> ExtinguisherHandles {
    let id = registry.allocate();
    let nozzle = Nozzle {
        offset: config.extinguisher.nozzle_offset,
        forward: config.extinguisher.nozzle_forward,
    };
    let entity = world.spawn((
        id,
        Extinguisher,
        pose,
        nozzle,
        PressureResource::from_config(&config.extinguisher),
        ArmingState::new(),
        SprayController::default(),
        Collider {
            shape: ColliderShape::Box {
                half_extents: [0.08, 0.3, 0.08],
            },
            layer: LayerMask::PROP,
        },
    ));
    registry.register(id, entity);

    let pin = spawn_pin(world, registry, id, &pose, &config.pin);
    ExtinguisherHandles {
        extinguisher: id,
        pin,
    }
}

/// Spawn a pin seated in the slot of `extinguisher`, whose world pose is `frame`.
pub fn spawn_pin(
    world: &mut World,
    registry: &mut ObjectRegistry,
    extinguisher: ObjectId,
    frame: &Pose,
    config: &PinConfig,
) -> ObjectId {
    let id = registry.allocate();
    let seat = Pose::from_position(config.seat_offset);
    let entity = world.spawn((
        id,
        Pin,
        frame.compose(&seat),
        PullGesture::new(seat, config.clone()),
        PinLink { extinguisher },
        Collider {
            shape: ColliderShape::Sphere { radius: PIN_RADIUS },
            layer: LayerMask::PIN,
        },
        seated_body(),
    ));
    registry.register(id, entity);
    id
}

/// Rigid body of a pin held in its slot.
pub fn seated_body() -> RigidBody {
    RigidBody {
        velocity: DVec3::ZERO,
        mass: PIN_MASS,
        kinematic: true,
        use_gravity: false,
    }
}

/// Spawn a burning fire target with a sphere collider.
pub fn spawn_fire(
    world: &mut World,
    registry: &mut ObjectRegistry,
    position: DVec3,
    config: &FireConfig,
) -> ObjectId {
    let id = registry.allocate();
    let entity = world.spawn((
        id,
        FireTarget,
        Pose::from_position(position),
        HeatState::from_config(config),
        Collider {
            shape: ColliderShape::Sphere {
                radius: config.radius,
            },
            layer: LayerMask::FIRE,
        },
    ));
    registry.register(id, entity);
    id
}

/// Spawn an extra collider belonging to `fire`. Hits on it cool the parent.
pub fn spawn_fire_part(
    world: &mut World,
    registry: &mut ObjectRegistry,
    fire: ObjectId,
    pose: Pose,
    shape: ColliderShape,
) -> ObjectId {
    let id = registry.allocate();
    let entity = world.spawn((
        id,
        pose,
        Collider {
            shape,
            layer: LayerMask::FIRE,
        },
        Parent(fire),
    ));
    registry.register(id, entity);
    id
}

/// Spawn a loose sphere that falls and can be pushed around.
pub fn spawn_prop(
    world: &mut World,
    registry: &mut ObjectRegistry,
    position: DVec3,
    radius: f64,
    mass: f64,
) -> ObjectId {
    let id = registry.allocate();
    let entity = world.spawn((
        id,
        Pose::from_position(position),
        Collider {
            shape: ColliderShape::Sphere { radius },
            layer: LayerMask::PROP,
        },
        RigidBody {
            velocity: DVec3::ZERO,
            mass: mass.max(MIN_DIVISOR),
            kinematic: false,
            use_gravity: true,
        },
    ));
    registry.register(id, entity);
    id
}
