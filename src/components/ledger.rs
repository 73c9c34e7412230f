use bevy::prelude::*;
use nalgebra::Vector3;
use std::collections::HashMap;

use crate::utils::constants::LEDGER_VISIBLE_FORCE;

/// Named per-tick force record for an external debug visualizer.
///
/// Cleared and repopulated every tick by the force systems; the simulation
/// itself never reads it back. Consumers treat entries below 1 N or with a
/// non-finite vector as invisible, so those are not recorded at all.
#[derive(Component, Debug, Clone, Default)]
pub struct DebugForceLedger {
    entries: HashMap<&'static str, LedgerEntry>,
}

#[derive(Debug, Clone)]
pub struct LedgerEntry {
    /// Force in newtons, world frame
    pub force: Vector3<f64>,
    /// Display color, linear RGB
    pub color: [f32; 3],
}

impl DebugForceLedger {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn record(&mut self, name: &'static str, force: Vector3<f64>, color: [f32; 3]) {
        if !force.iter().all(|v| v.is_finite()) {
            return;
        }
        if force.norm() < LEDGER_VISIBLE_FORCE {
            return;
        }
        self.entries.insert(name, LedgerEntry { force, color });
    }

    pub fn get(&self, name: &str) -> Option<&LedgerEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &LedgerEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
