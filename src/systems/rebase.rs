use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{Occupancy, SpatialComponent, VehicleParams};
use crate::resources::{OriginOffset, RebaseConfig};

/// Outbound notification of a floating-origin rebase. Every collaborator
/// anchored to world coordinates receives the offset that was subtracted
/// so it can shift its own large-scale bookkeeping by the same amount.
#[derive(Event, Debug, Clone)]
pub struct OriginShifted {
    pub offset: Vector3<f64>,
}

/// Floating-origin rebase: when the active (occupied) vehicle drifts too
/// far horizontally, subtract its horizontal offset from every tracked
/// kinematic state and broadcast the shift.
///
/// Runs as the last stage of the tick, strictly after integration and
/// never interleaved with force computation. Velocities, angular
/// velocities and attitudes are untouched, so every pairwise relative
/// position is preserved exactly; only absolute coordinates move.
pub fn floating_origin_system(
    mut spatials: Query<(&mut SpatialComponent, Option<(&Occupancy, &VehicleParams)>)>,
    config: Res<RebaseConfig>,
    mut origin: ResMut<OriginOffset>,
    mut events: EventWriter<OriginShifted>,
) {
    let mut offset = None;
    for (spatial, vehicle) in spatials.iter() {
        let occupied = vehicle.map_or(false, |(occupancy, _)| occupancy.is_occupied());
        if !occupied {
            continue;
        }
        let horizontal =
            (spatial.position.x * spatial.position.x + spatial.position.y * spatial.position.y).sqrt();
        if horizontal > config.threshold {
            offset = Some(Vector3::new(spatial.position.x, spatial.position.y, 0.0));
            break;
        }
    }

    let Some(offset) = offset else {
        return;
    };

    for (mut spatial, _) in spatials.iter_mut() {
        spatial.position -= offset;
    }

    origin.accumulated += offset;
    origin.rebase_count += 1;
    events.send(OriginShifted { offset });
    info!(
        offset_x = offset.x,
        offset_y = offset.y,
        "floating-origin rebase"
    );
}
