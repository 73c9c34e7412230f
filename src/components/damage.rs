use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Destructible structural parts across all vehicle kinds. Each vehicle
/// carries the subset that exists on its airframe/chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehiclePart {
    LeftWing,
    RightWing,
    HorizontalTail,
    VerticalTail,
    LandingGear,
    MainRotor,
    TailRotor,
    TailBoom,
    WheelFrontLeft,
    WheelFrontRight,
    WheelRearLeft,
    WheelRearRight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartSlot {
    part: VehiclePart,
    intact: bool,
}

/// Per-vehicle structural damage state.
///
/// Each part transitions Intact -> Destroyed exactly once; the flag never
/// flips back except through `reset()`. A destroyed part stops contributing
/// to the force model from the next force computation onward, never
/// mid-tick: damage intake runs in its own stage before the force stage.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct DamageState {
    parts: Vec<PartSlot>,
    /// Next part broken by a sequential break command
    cursor: usize,
    /// Impact speed that destroys a part (m/s)
    pub impact_threshold: f64,
}

impl DamageState {
    pub fn new(order: &[VehiclePart], impact_threshold: f64) -> Self {
        Self {
            parts: order
                .iter()
                .map(|&part| PartSlot { part, intact: true })
                .collect(),
            cursor: 0,
            impact_threshold,
        }
    }

    pub fn has(&self, part: VehiclePart) -> bool {
        self.parts.iter().any(|s| s.part == part)
    }

    /// True only if the part exists on this vehicle and is still intact.
    /// Querying a part the vehicle never had reads as not-intact, so the
    /// dependent feature is silently skipped.
    pub fn is_intact(&self, part: VehiclePart) -> bool {
        self.parts
            .iter()
            .find(|s| s.part == part)
            .map(|s| s.intact)
            .unwrap_or(false)
    }

    /// Fraction of the listed parts still intact. Parts the vehicle does not
    /// carry count as destroyed.
    pub fn intact_fraction(&self, parts: &[VehiclePart]) -> f64 {
        if parts.is_empty() {
            return 1.0;
        }
        let intact = parts.iter().filter(|&&p| self.is_intact(p)).count();
        intact as f64 / parts.len() as f64
    }

    pub fn all_intact(&self) -> bool {
        self.parts.iter().all(|s| s.intact)
    }

    pub fn intact_parts(&self) -> Vec<VehiclePart> {
        self.parts
            .iter()
            .filter(|s| s.intact)
            .map(|s| s.part)
            .collect()
    }

    /// Destroy a specific part. Returns true if the part existed and was
    /// intact; repeat calls are no-ops. Destroying the tail boom also takes
    /// the tail rotor with it.
    pub fn destroy(&mut self, part: VehiclePart) -> bool {
        let destroyed = match self.parts.iter_mut().find(|s| s.part == part) {
            Some(slot) if slot.intact => {
                slot.intact = false;
                true
            }
            _ => false,
        };
        if destroyed && part == VehiclePart::TailBoom {
            self.destroy(VehiclePart::TailRotor);
        }
        destroyed
    }

    /// Sequential break: destroy the next still-intact part in the fixed
    /// order. Returns the part broken, or None when nothing is left.
    pub fn break_next(&mut self) -> Option<VehiclePart> {
        while self.cursor < self.parts.len() {
            let part = self.parts[self.cursor].part;
            self.cursor += 1;
            if self.is_intact(part) {
                self.destroy(part);
                return Some(part);
            }
        }
        None
    }

    /// Destroy a uniformly-chosen still-intact part
    pub fn break_random(&mut self, rng: &mut ChaCha8Rng) -> Option<VehiclePart> {
        let intact = self.intact_parts();
        if intact.is_empty() {
            return None;
        }
        let part = intact[rng.gen_range(0..intact.len())];
        self.destroy(part);
        Some(part)
    }

    /// Full vehicle reset: the only path that brings parts back
    pub fn reset(&mut self) {
        for slot in &mut self.parts {
            slot.intact = true;
        }
        self.cursor = 0;
    }
}

/// Inbound collision notification, produced by the physics engine's contact
/// reporting and routed into the damage state machine. `part_hit` names the
/// structural sub-part that took the hit when the contact geometry knows it.
#[derive(Event, Debug, Clone)]
pub struct ImpactEvent {
    pub vehicle: Entity,
    /// Relative impact speed (m/s)
    pub speed: f64,
    pub part_hit: Option<VehiclePart>,
}

/// Explicit sequential break command
#[derive(Event, Debug, Clone)]
pub struct BreakCommand {
    pub vehicle: Entity,
}
