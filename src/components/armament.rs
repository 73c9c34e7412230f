use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Fixed forward-firing gun. Projectile flight and effects are owned by an
/// external collaborator; this component only tracks ammunition and produces
/// a spread-perturbed muzzle ray per shot.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Armament {
    pub rounds: u32,
    /// 1-sigma angular spread (mrad)
    pub spread_mrad: f64,
    /// Muzzle speed relative to the vehicle (m/s)
    pub muzzle_speed: f64,
}

impl Armament {
    pub fn new(rounds: u32, spread_mrad: f64, muzzle_speed: f64) -> Self {
        Self {
            rounds,
            spread_mrad,
            muzzle_speed,
        }
    }

    /// Fire one round. Returns the world-frame muzzle direction, perturbed
    /// by spread. With no rounds remaining the command is ignored and
    /// reported at warn level; no state changes.
    pub fn fire(
        &mut self,
        attitude: &UnitQuaternion<f64>,
        rng: &mut ChaCha8Rng,
    ) -> Option<Vector3<f64>> {
        if self.rounds == 0 {
            warn!("gun fired with no rounds remaining, ignoring");
            return None;
        }
        self.rounds -= 1;

        let spread = self.spread_mrad * 1e-3;
        let yaw_off = (rng.gen::<f64>() * 2.0 - 1.0) * spread;
        let pitch_off = (rng.gen::<f64>() * 2.0 - 1.0) * spread;
        let dir_body = Vector3::new(1.0, yaw_off, pitch_off).normalize();
        Some(attitude * dir_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn firing_decrements_and_stays_near_boresight() {
        let mut gun = Armament::new(3, 2.0, 900.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let attitude = UnitQuaternion::identity();

        let dir = gun.fire(&attitude, &mut rng).unwrap();
        assert_eq!(gun.rounds, 2);
        assert_relative_eq!(dir.norm(), 1.0, epsilon = 1e-12);
        // 2 mrad spread keeps the ray within ~0.2 deg of boresight
        assert!(dir.x > 0.999);
    }

    #[test]
    fn empty_gun_is_a_no_op() {
        let mut gun = Armament::new(0, 2.0, 900.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(gun.fire(&UnitQuaternion::identity(), &mut rng).is_none());
        assert_eq!(gun.rounds, 0);
    }

    #[test]
    fn spread_is_deterministic_per_seed() {
        let attitude = UnitQuaternion::identity();
        let mut a = (
            Armament::new(5, 3.0, 900.0),
            ChaCha8Rng::seed_from_u64(21),
        );
        let mut b = (
            Armament::new(5, 3.0, 900.0),
            ChaCha8Rng::seed_from_u64(21),
        );
        let da = a.0.fire(&attitude, &mut a.1).unwrap();
        let db = b.0.fire(&attitude, &mut b.1).unwrap();
        assert_eq!(da, db);
    }
}
