use bevy::prelude::*;

use crate::components::{BreakCommand, DamageState, ImpactEvent};
use crate::resources::RngBank;

/// Route inbound impact events and explicit break commands into the damage
/// state machines. Runs in its own stage before force computation, so a
/// flag mutated here is visible to every force model from this tick onward
/// and force computation never sees a half-applied transition.
pub fn damage_intake_system(
    mut impacts: EventReader<ImpactEvent>,
    mut breaks: EventReader<BreakCommand>,
    mut vehicles: Query<&mut DamageState>,
    mut rng: ResMut<RngBank>,
) {
    for impact in impacts.read() {
        let Ok(mut damage) = vehicles.get_mut(impact.vehicle) else {
            continue;
        };
        if !impact.speed.is_finite() || impact.speed < damage.impact_threshold {
            continue;
        }

        // One roll per threshold multiple: the first goes to the part that
        // was actually hit, the rest land on random still-intact parts.
        let rolls = (impact.speed / damage.impact_threshold) as usize;

        let first = match impact.part_hit {
            Some(part) => {
                if damage.destroy(part) {
                    Some(part)
                } else {
                    None
                }
            }
            None => damage.break_random(rng.stream("damage")),
        };
        if let Some(part) = first {
            info!(?part, speed = impact.speed, "impact destroyed part");
        }

        for _ in 1..rolls {
            if let Some(part) = damage.break_random(rng.stream("damage")) {
                info!(?part, speed = impact.speed, "secondary impact damage");
            }
        }
    }

    for command in breaks.read() {
        let Ok(mut damage) = vehicles.get_mut(command.vehicle) else {
            continue;
        };
        if let Some(part) = damage.break_next() {
            info!(?part, "sequential break");
        }
    }
}
