//! Free-body integration: gravity, velocity and the floor plane.
//!
//! Only non-kinematic bodies move. Bodies below the floor are put back on
//! it and lose their vertical speed; horizontal speed then bleeds off.

use hecs::World;

use extinguish_core::components::RigidBody;
use extinguish_core::constants::{FLOOR_FRICTION, FLOOR_Y, GRAVITY};
use extinguish_core::types::Pose;

/// Integrate every free body by `dt`.
pub fn run(world: &mut World, dt: f64) {
    let dt = dt.max(0.0);
    for (_entity, (pose, body)) in world.query_mut::<(&mut Pose, &mut RigidBody)>() {
        if body.kinematic {
            continue;
        }
        if body.use_gravity {
            body.velocity.y -= GRAVITY * dt;
        }
        pose.position += body.velocity * dt;

        if pose.position.y <= FLOOR_Y && body.use_gravity {
            pose.position.y = FLOOR_Y;
            body.velocity.y = body.velocity.y.max(0.0);
            let keep = (1.0 - FLOOR_FRICTION * dt).max(0.0);
            body.velocity.x *= keep;
            body.velocity.z *= keep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn free_body() -> RigidBody {
        RigidBody {
            velocity: DVec3::ZERO,
            mass: 1.0,
            kinematic: false,
            use_gravity: true,
        }
    }

    #[test]
    fn test_falls_and_rests_on_floor() {
        let mut world = World::new();
        let e = world.spawn((Pose::from_position(DVec3::new(0.0, 1.0, 0.0)), free_body()));
        for _ in 0..300 {
            run(&mut world, 0.01);
        }
        let pose = *world.get::<&Pose>(e).unwrap();
        assert_eq!(pose.position.y, FLOOR_Y);
        assert_eq!(world.get::<&RigidBody>(e).unwrap().velocity.y, 0.0);
    }

    #[test]
    fn test_kinematic_body_does_not_move() {
        let mut world = World::new();
        let body = RigidBody {
            kinematic: true,
            velocity: DVec3::X,
            ..free_body()
        };
        let e = world.spawn((Pose::from_position(DVec3::new(0.0, 1.0, 0.0)), body));
        run(&mut world, 0.5);
        assert_eq!(world.get::<&Pose>(e).unwrap().position, DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_weightless_body_drifts() {
        let mut world = World::new();
        let body = RigidBody {
            velocity: DVec3::new(1.0, 0.0, 0.0),
            use_gravity: false,
            ..free_body()
        };
        let e = world.spawn((Pose::from_position(DVec3::new(0.0, 1.0, 0.0)), body));
        run(&mut world, 0.5);
        let p = world.get::<&Pose>(e).unwrap().position;
        assert!((p - DVec3::new(0.5, 1.0, 0.0)).length() < 1e-12);
    }
}
