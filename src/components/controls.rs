use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Normalized control inputs, recomputed every tick by the external input
/// collaborator while the vehicle is occupied. Never persisted across ticks
/// by the simulation; an unoccupied vehicle has them forced to zero.
///
/// Per-kind mapping:
/// - FixedWing / Jet: `pitch`/`roll`/`yaw` drive elevator/aileron/rudder,
///   `throttle` the engine, `flaps` and `gear_down` the high-lift and gear
///   equipment, `afterburner` the jet reheat.
/// - Helicopter: `pitch`/`roll` are cyclic, `yaw` is the pedals,
///   `collective` is the collective lever (0 = released, engages hover
///   hold when airborne).
/// - Car: `drive` is the forward/reverse axis, `yaw` is steering,
///   `brake` the dedicated brake.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Nose up at +1 [-1, 1]
    pub pitch: f64,
    /// Roll right at +1 [-1, 1]
    pub roll: f64,
    /// Nose left at +1 [-1, 1]
    pub yaw: f64,
    /// Engine power [0, 1]
    pub throttle: f64,
    /// Collective lever, helicopter only [-1, 1]
    pub collective: f64,
    /// Forward/reverse drive axis, ground vehicles only [-1, 1]
    pub drive: f64,
    /// Flap deployment [0, 1]
    pub flaps: f64,
    /// Brake application [0, 1]
    pub brake: f64,
    pub afterburner: bool,
    pub gear_down: bool,
    pub engine_on: bool,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            throttle: 0.0,
            collective: 0.0,
            drive: 0.0,
            flaps: 0.0,
            brake: 0.0,
            afterburner: false,
            gear_down: true,
            engine_on: true,
        }
    }
}

impl ControlInputs {
    /// Clamp every axis to its documented range. Force systems call this
    /// before reading, so an out-of-range write from a collaborator can
    /// never push a force model outside its envelope.
    pub fn clamp_ranges(&mut self) {
        self.pitch = self.pitch.clamp(-1.0, 1.0);
        self.roll = self.roll.clamp(-1.0, 1.0);
        self.yaw = self.yaw.clamp(-1.0, 1.0);
        self.throttle = self.throttle.clamp(0.0, 1.0);
        self.collective = self.collective.clamp(-1.0, 1.0);
        self.drive = self.drive.clamp(-1.0, 1.0);
        self.flaps = self.flaps.clamp(0.0, 1.0);
        self.brake = self.brake.clamp(0.0, 1.0);
    }

    /// Zero all axes, keeping equipment toggles as they are
    pub fn release(&mut self) {
        self.pitch = 0.0;
        self.roll = 0.0;
        self.yaw = 0.0;
        self.throttle = 0.0;
        self.collective = 0.0;
        self.drive = 0.0;
        self.brake = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_ranges_bounds_every_axis() {
        let mut inputs = ControlInputs {
            pitch: 3.0,
            roll: -2.5,
            yaw: 1.5,
            throttle: 7.0,
            collective: -9.0,
            drive: 2.0,
            flaps: -1.0,
            brake: 1.5,
            ..Default::default()
        };
        inputs.clamp_ranges();
        assert_eq!(inputs.pitch, 1.0);
        assert_eq!(inputs.roll, -1.0);
        assert_eq!(inputs.yaw, 1.0);
        assert_eq!(inputs.throttle, 1.0);
        assert_eq!(inputs.collective, -1.0);
        assert_eq!(inputs.drive, 1.0);
        assert_eq!(inputs.flaps, 0.0);
        assert_eq!(inputs.brake, 1.0);
    }
}
