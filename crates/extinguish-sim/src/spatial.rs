//! Spatial queries over the ECS world.
//!
//! `SpatialQuery` is the seam to the physics collaborator: the cone detector
//! and the radial push only need sphere overlaps with closest points. The
//! built-in `WorldSpatial` answers them from `Collider` components.

use glam::DVec3;
use hecs::{Entity, World};

use extinguish_core::components::{Collider, Parent, RigidBody};
use extinguish_core::constants::{DIRECTION_EPSILON, MIN_DIVISOR};
use extinguish_core::enums::ColliderShape;
use extinguish_core::types::{LayerMask, ObjectId, Pose};

use crate::heat::HeatState;

/// A collider found by a broad-phase query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    /// The collider's own object id, if it has one.
    pub object: Option<ObjectId>,
    /// Object whose state a hit on this collider affects: the collider's own
    /// object when it carries heat, else the parent, else its own object.
    pub owner: Option<ObjectId>,
    /// Point on the collider surface closest to the query origin (the origin
    /// itself when inside).
    pub closest_point: DVec3,
    /// Entity carrying the rigid body attached to this collider.
    pub body: Option<Entity>,
}

/// Broad-phase physics queries.
pub trait SpatialQuery {
    /// All colliders on `layers` whose closest point lies within `radius` of `origin`.
    fn overlap_sphere(&self, origin: DVec3, radius: f64, layers: LayerMask) -> Vec<Candidate>;
}

/// `SpatialQuery` backed by the `Pose` + `Collider` components of a world.
pub struct WorldSpatial<'w> {
    world: &'w World,
}

impl<'w> WorldSpatial<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }
}

impl SpatialQuery for WorldSpatial<'_> {
    fn overlap_sphere(&self, origin: DVec3, radius: f64, layers: LayerMask) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut query = self.world.query::<(
            &Pose,
            &Collider,
            Option<&ObjectId>,
            Option<&Parent>,
            Option<&RigidBody>,
            Option<&HeatState>,
        )>();
        for (entity, (pose, collider, object, parent, body, heat)) in query.iter() {
            if !layers.contains(collider.layer) {
                continue;
            }
            let closest_point = closest_point(&collider.shape, pose, origin);
            if closest_point.distance(origin) > radius {
                continue;
            }
            let owner = match (object, heat) {
                (Some(own), Some(_)) => Some(*own),
                _ => parent.map(|p| p.0).or_else(|| object.copied()),
            };
            candidates.push(Candidate {
                entity,
                object: object.copied(),
                owner,
                closest_point,
                body: body.map(|_| entity),
            });
        }
        candidates
    }
}

/// Closest point on a collider to `point`. Points inside return themselves.
pub fn closest_point(shape: &ColliderShape, pose: &Pose, point: DVec3) -> DVec3 {
    match *shape {
        ColliderShape::Sphere { radius } => {
            let offset = point - pose.position;
            let distance = offset.length();
            if distance <= radius {
                point
            } else {
                pose.position + offset / distance * radius
            }
        }
        ColliderShape::Box { half_extents } => {
            let half = DVec3::from_array(half_extents).abs();
            let local = pose.inverse_transform_point(point).clamp(-half, half);
            pose.transform_point(local)
        }
    }
}

/// Push every non-kinematic body within `radius` of `origin` directly away
/// from it. The impulse falls off linearly to zero at `radius`.
/// Returns the number of bodies pushed.
pub fn apply_radial_force(
    world: &mut World,
    origin: DVec3,
    force: f64,
    radius: f64,
    layers: LayerMask,
) -> usize {
    if radius <= 0.0 || force == 0.0 {
        return 0;
    }

    let bodies: Vec<Entity> = WorldSpatial::new(world)
        .overlap_sphere(origin, radius, layers)
        .into_iter()
        .filter_map(|candidate| candidate.body)
        .collect();

    let mut pushed = 0;
    for entity in bodies {
        let Ok((pose, body)) = world.query_one_mut::<(&Pose, &mut RigidBody)>(entity) else {
            continue;
        };
        if body.kinematic {
            continue;
        }
        let offset = pose.position - origin;
        let distance = offset.length();
        let direction = if distance < DIRECTION_EPSILON {
            DVec3::Y
        } else {
            offset / distance
        };
        let falloff = (1.0 - distance / radius).clamp(0.0, 1.0);
        body.velocity += direction * (force * falloff / body.mass.max(MIN_DIVISOR));
        pushed += 1;
    }
    pushed
}
