use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Mount/occupancy lifecycle. Exactly one occupant at a time; mounting an
/// occupied vehicle fails silently.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Occupancy {
    occupant: Option<Entity>,
}

impl Occupancy {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    /// Returns false (and changes nothing) if already occupied
    pub fn mount(&mut self, who: Entity) -> bool {
        if self.occupant.is_some() {
            debug!("mount refused, vehicle already occupied");
            return false;
        }
        self.occupant = Some(who);
        true
    }

    /// Always succeeds; returns the previous occupant if there was one
    pub fn unmount(&mut self) -> Option<Entity> {
        self.occupant.take()
    }
}

/// Main-rotor spool state. A separate first-order state from collective:
/// the rotor spools toward full speed while the engine runs and winds down
/// otherwise, and every bit of rotor authority scales with it.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RotorState {
    /// Rotor speed as a fraction of nominal [0, 1]
    pub spin: f64,
}

impl Default for RotorState {
    fn default() -> Self {
        Self { spin: 0.0 }
    }
}

/// Altitude-hold state for the helicopter collective.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HoverHold {
    /// Captured target altitude (MSL); None while flying manually
    pub target: Option<f64>,
    /// Accumulated altitude error (m*s), clamped by the hold parameters
    pub integral: f64,
}

impl HoverHold {
    pub fn disengage(&mut self) {
        self.target = None;
        self.integral = 0.0;
    }
}

/// Current front-wheel steering angle, slewed toward the input target
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SteeringState {
    /// Steering angle (rad), positive steers left
    pub angle: f64,
}

/// Smoothed turbulence state: the gust force direction wanders toward a
/// periodically-retargeted random vector.
#[derive(Component, Debug, Clone, Default)]
pub struct GustState {
    pub current: Vector3<f64>,
    pub target: Vector3<f64>,
    /// Seconds until the next gust retarget
    pub time_to_next: f64,
}
