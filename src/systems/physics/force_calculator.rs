use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{PhysicsComponent, ReferenceFrame, SpatialComponent};
use crate::resources::PhysicsConfig;

/// Reduce the per-tick force and moment lists to a net force (world frame)
/// and net moment (body frame), adding gravity. Application points are
/// body-frame offsets from the center of mass, so point forces contribute
/// their torque in the body frame.
pub fn aggregate_forces_system(
    mut query: Query<(&mut PhysicsComponent, &SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    for (mut physics, spatial) in query.iter_mut() {
        let attitude = spatial.attitude;

        let mut net_force = config.gravity * physics.mass;
        let mut net_moment = Vector3::zeros();

        for force in &physics.forces {
            let (world, body) = match force.frame {
                ReferenceFrame::Body => (attitude * force.vector, force.vector),
                ReferenceFrame::Inertial => (force.vector, attitude.inverse() * force.vector),
            };
            net_force += world;
            if let Some(point) = force.point {
                net_moment += point.cross(&body);
            }
        }

        for moment in &physics.moments {
            net_moment += match moment.frame {
                ReferenceFrame::Body => moment.vector,
                ReferenceFrame::Inertial => attitude.inverse() * moment.vector,
            };
        }

        physics.net_force = net_force;
        physics.net_moment = net_moment;
    }
}
