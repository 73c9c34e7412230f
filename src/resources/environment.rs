use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{DENSITY_SCALE_HEIGHT, SEA_LEVEL_DENSITY};

/// Atmosphere model feeding dynamic pressure.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Atmosphere {
    pub model: AtmosphereModel,
    pub sea_level_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AtmosphereModel {
    /// Constant sea-level density everywhere
    Constant,
    /// Exponential density decay with altitude
    Standard,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            model: AtmosphereModel::Standard,
            sea_level_density: SEA_LEVEL_DENSITY,
        }
    }
}

impl Atmosphere {
    /// Air density at the given altitude above sea level (kg/m^3)
    pub fn density_at(&self, altitude_msl: f64) -> f64 {
        match self.model {
            AtmosphereModel::Constant => self.sea_level_density,
            AtmosphereModel::Standard => {
                let alt = altitude_msl.max(0.0);
                self.sea_level_density * (-alt / DENSITY_SCALE_HEIGHT).exp()
            }
        }
    }
}

/// Constant ambient wind. Turbulence is layered on top of this by the
/// turbulence system.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wind {
    pub velocity: Vector3<f64>,
}

/// Ground elevation query. Terrain generation lives outside this crate; the
/// collaborator that owns the terrain keeps this in sync. The default is a
/// flat plane at z = 0.
#[derive(Resource, Debug, Clone)]
pub struct GroundModel {
    pub elevation: f64,
}

impl Default for GroundModel {
    fn default() -> Self {
        Self { elevation: 0.0 }
    }
}

impl GroundModel {
    pub fn height_at(&self, _x: f64, _y: f64) -> f64 {
        self.elevation
    }
}

/// Atmospheric turbulence perturbation settings
#[derive(Resource, Debug, Clone)]
pub struct TurbulenceConfig {
    /// No turbulence below this airspeed (m/s)
    pub min_airspeed: f64,
    /// Minimum height above ground to count as airborne (m)
    pub min_height: f64,
    /// Gust force per unit dynamic pressure (m^2)
    pub intensity: f64,
    /// Seconds between gust retargets
    pub gust_period: f64,
    /// First-order smoothing rate toward the gust target (1/s)
    pub smoothing: f64,
}

impl Default for TurbulenceConfig {
    fn default() -> Self {
        Self {
            min_airspeed: 15.0,
            min_height: 4.0,
            intensity: 0.35,
            gust_period: 1.6,
            smoothing: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn density_decays_with_altitude() {
        let atm = Atmosphere::default();
        assert_relative_eq!(atm.density_at(0.0), 1.225, epsilon = 1e-9);
        assert!(atm.density_at(5000.0) < atm.density_at(1000.0));
        assert!(atm.density_at(5000.0) > 0.0);
    }

    #[test]
    fn constant_model_ignores_altitude() {
        let atm = Atmosphere {
            model: AtmosphereModel::Constant,
            sea_level_density: 1.225,
        };
        assert_relative_eq!(atm.density_at(8000.0), 1.225, epsilon = 1e-12);
    }
}
