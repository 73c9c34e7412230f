use bevy::prelude::*;
use nalgebra::UnitQuaternion;

use crate::components::{PhysicsComponent, SpatialComponent};
use crate::resources::PhysicsConfig;

/// Advance one kinematic state by one timestep.
///
/// Semi-implicit Euler: velocity first, then position from the updated
/// velocity. Stiff spring-damper suspension stays stable at the fixed tick
/// rate this way, where explicit Euler would feed energy in. Angular
/// velocity and moments are in the body frame, with the gyroscopic term
/// included.
pub fn integrate_state(physics: &PhysicsComponent, spatial: &mut SpatialComponent, dt: f64) {
    let acceleration = physics.net_force / physics.mass;
    spatial.velocity += acceleration * dt;
    spatial.position += spatial.velocity * dt;

    let omega = spatial.angular_velocity;
    let gyro = omega.cross(&(physics.inertia * omega));
    let angular_acceleration = physics.inertia_inv * (physics.net_moment - gyro);
    spatial.angular_velocity += angular_acceleration * dt;

    if spatial.angular_velocity.norm() > 1e-12 {
        let rotation = UnitQuaternion::from_scaled_axis(spatial.angular_velocity * dt);
        // Body-frame rates compose on the right
        spatial.attitude *= rotation;
        spatial.attitude =
            UnitQuaternion::from_quaternion(spatial.attitude.into_inner().normalize());
    }
}

pub fn physics_integrator_system(
    mut query: Query<(&PhysicsComponent, &mut SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    let dt = config.timestep;
    for (physics, mut spatial) in query.iter_mut() {
        integrate_state(physics, &mut spatial, dt);

        // Keep the caps enforced between sanitizer runs as well
        let speed = spatial.velocity.norm();
        if speed > config.max_velocity {
            spatial.velocity *= config.max_velocity / speed;
        }
        let rate = spatial.angular_velocity.norm();
        if rate > config.max_angular_velocity {
            spatial.angular_velocity *= config.max_angular_velocity / rate;
        }
    }
}
