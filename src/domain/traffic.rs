//! Traffic made of a fixed set of cars that are moved ahead of the player once they fall too far
//! behind, so a bounded number of cars fills an endless road.

use std::ops::RangeInclusive;

use rand::Rng;

use super::{
    kinematics, ConfigError, Dimensions, LateralBound, Position, TimeStep, VehicleState,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TrafficPool {
    vehicles: Vec<VehicleState>,
    profile: TrafficProfile,
}

impl TrafficPool {
    /// Scatters `profile.pool_size` cars over the start section of the road.
    pub fn new<R: Rng>(
        profile: TrafficProfile,
        lateral_bound: LateralBound,
        dimensions: Dimensions,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        profile.validate()?;

        let vehicles = (0..profile.pool_size)
            .map(|_| {
                let forward = rng.random_range(profile.spawn_forward.clone());
                let lateral = rng.random_range(profile.spawn_lateral.clone());
                let speed = rng.random_range(profile.spawn_speed.clone());
                VehicleState::new(
                    Position::new(lateral, forward),
                    speed,
                    lateral_bound,
                    dimensions,
                )
            })
            .collect();

        Ok(Self { vehicles, profile })
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicles(&self) -> &[VehicleState] {
        &self.vehicles
    }

    /// Moves every car forward and recycles the ones left behind `player_forward`. Returns the
    /// number of recycled cars.
    pub fn update<R: Rng>(
        &mut self,
        player_forward: f64,
        dt: TimeStep,
        rng: &mut R,
    ) -> usize {
        let mut recycled = 0;

        for vehicle in self.vehicles.iter_mut() {
            *vehicle = cruise(vehicle, dt);
            if is_left_behind(vehicle, player_forward, &self.profile) {
                *vehicle = recycle(vehicle, player_forward, &self.profile, rng);
                recycled += 1;
            }
        }

        recycled
    }
}

/// Constant-speed travel straight ahead.
pub fn cruise(vehicle: &VehicleState, dt: TimeStep) -> VehicleState {
    let position = vehicle.position();
    let mut next = vehicle.clone();
    next.set_position(
        position.with_forward(kinematics::advance(position.forward(), vehicle.speed(), dt)),
    );
    next
}

pub fn is_left_behind(vehicle: &VehicleState, player_forward: f64, profile: &TrafficProfile) -> bool {
    player_forward - vehicle.position().forward() > profile.recycle_trigger_distance
}

/// Places the car somewhere ahead of the player with a fresh speed. The new spot is not checked
/// against other cars, so two cars may end up overlapping.
pub fn recycle<R: Rng>(
    vehicle: &VehicleState,
    player_forward: f64,
    profile: &TrafficProfile,
    rng: &mut R,
) -> VehicleState {
    let forward = player_forward + rng.random_range(profile.recycle_ahead.clone());
    let lateral = rng.random_range(profile.recycle_lateral.clone());
    let speed = rng.random_range(profile.recycle_speed.clone());

    let mut next = vehicle.clone();
    next.set_position(Position::new(lateral, forward));
    next.set_speed(speed);
    next
}

/// Ranges are sampled uniformly and inclusively. Distances are along the road.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficProfile {
    pub pool_size: usize,
    pub spawn_forward: RangeInclusive<f64>,
    pub spawn_lateral: RangeInclusive<f64>,
    pub spawn_speed: RangeInclusive<f64>,
    pub recycle_ahead: RangeInclusive<f64>,
    pub recycle_lateral: RangeInclusive<f64>,
    pub recycle_speed: RangeInclusive<f64>,
    pub recycle_trigger_distance: f64,
}

impl TrafficProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }

        for (name, range) in [
            ("spawn_forward", &self.spawn_forward),
            ("spawn_lateral", &self.spawn_lateral),
            ("spawn_speed", &self.spawn_speed),
            ("recycle_ahead", &self.recycle_ahead),
            ("recycle_lateral", &self.recycle_lateral),
            ("recycle_speed", &self.recycle_speed),
        ] {
            if !range.start().is_finite() || !range.end().is_finite() || range.is_empty() {
                return Err(ConfigError::InvertedRange {
                    name,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }

        if self.recycle_trigger_distance.is_nan() || self.recycle_trigger_distance <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "recycle_trigger_distance",
                value: self.recycle_trigger_distance,
            });
        }

        Ok(())
    }
}

impl Default for TrafficProfile {
    fn default() -> Self {
        Self {
            pool_size: 50,
            spawn_forward: 50.0..=800.0,
            spawn_lateral: -7.0..=7.0,
            spawn_speed: 40.0..=65.0,
            recycle_ahead: 300.0..=500.0,
            recycle_lateral: -8.0..=8.0,
            recycle_speed: 45.0..=70.0,
            recycle_trigger_distance: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::tests::seeded_rng;

    fn dt(seconds: f64) -> TimeStep {
        TimeStep::from_secs_f64(seconds).unwrap()
    }

    fn pool(seed: u64) -> TrafficPool {
        TrafficPool::new(
            TrafficProfile::default(),
            LateralBound::default(),
            Dimensions::default(),
            &mut seeded_rng(seed),
        )
        .unwrap()
    }

    fn car(lateral: f64, forward: f64, speed: f64) -> VehicleState {
        VehicleState::new(
            Position::new(lateral, forward),
            speed,
            LateralBound::default(),
            Dimensions::default(),
        )
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(19878367467712)]
    fn test_pool_spawn(#[case] seed: u64) {
        let pool = pool(seed);
        assert_eq!(pool.len(), 50);
        for vehicle in pool.vehicles() {
            assert!((50.0..=800.0).contains(&vehicle.position().forward()));
            assert!((-7.0..=7.0).contains(&vehicle.position().lateral()));
            assert!((40.0..=65.0).contains(&vehicle.speed()));
        }
    }

    #[test]
    fn test_pool_is_deterministic_for_a_seed() {
        assert_eq!(pool(42), pool(42));
        assert_ne!(pool(42), pool(43));
    }

    #[test]
    fn test_cruise() {
        let vehicle = cruise(&car(-3.0, 100.0, 50.0), dt(0.1));
        assert_abs_diff_eq!(vehicle.position().forward(), 105.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vehicle.position().lateral(), -3.0);
        assert_abs_diff_eq!(vehicle.speed(), 50.0);
    }

    #[rstest]
    #[case::far_behind(300.0, 500.0, true)]
    #[case::at_trigger(350.0, 500.0, false)]
    #[case::just_past_trigger(349.9, 500.0, true)]
    #[case::ahead(600.0, 500.0, false)]
    fn test_is_left_behind(#[case] forward: f64, #[case] player: f64, #[case] expected: bool) {
        assert_eq!(
            is_left_behind(&car(0.0, forward, 50.0), player, &TrafficProfile::default()),
            expected
        );
    }

    #[test]
    fn test_recycle_ahead_of_player() {
        let mut rng = seeded_rng(3);
        for _ in 0..1000 {
            let vehicle = recycle(
                &car(2.0, 300.0, 50.0),
                500.0,
                &TrafficProfile::default(),
                &mut rng,
            );
            assert!((800.0..=1000.0).contains(&vehicle.position().forward()));
            assert!((-8.0..=8.0).contains(&vehicle.position().lateral()));
            assert!((45.0..=70.0).contains(&vehicle.speed()));
        }
    }

    #[test]
    fn test_update_recycles_cars_left_behind() {
        let mut rng = seeded_rng(11);
        let mut pool = pool(11);
        let player_forward = 2000.0;

        let recycled = pool.update(player_forward, dt(0.1), &mut rng);

        // Every car spawned below 800 and crawls less than 7 units in 0.1 s
        assert_eq!(recycled, 50);
        assert_eq!(pool.len(), 50);
        for vehicle in pool.vehicles() {
            assert!(vehicle.position().forward() >= player_forward + 300.0);
            assert!(vehicle.position().forward() <= player_forward + 500.0);
            assert!((45.0..=70.0).contains(&vehicle.speed()));
        }
    }

    #[test]
    fn test_update_keeps_cars_near_player() {
        let mut rng = seeded_rng(5);
        let mut pool = pool(5);
        let before = pool.clone();

        let recycled = pool.update(0.0, dt(0.1), &mut rng);

        assert_eq!(recycled, 0);
        for (vehicle, previous) in std::iter::zip(pool.vehicles(), before.vehicles()) {
            assert_abs_diff_eq!(
                vehicle.position().forward(),
                previous.position().forward() + previous.speed() * 0.1,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(vehicle.speed(), previous.speed());
        }
    }

    #[test]
    fn test_pool_size_is_constant() {
        let mut rng = seeded_rng(9);
        let mut pool = pool(9);
        let mut player_forward = 0.0;
        for _ in 0..5000 {
            player_forward += 10.0;
            pool.update(player_forward, dt(0.1), &mut rng);
            assert_eq!(pool.len(), 50);
        }
    }

    #[test]
    fn test_validate() {
        let profile = TrafficProfile {
            recycle_speed: 70.0..=45.0,
            ..TrafficProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ConfigError::InvertedRange {
                name: "recycle_speed",
                min: 70.0,
                max: 45.0
            })
        );

        let profile = TrafficProfile {
            pool_size: 0,
            ..TrafficProfile::default()
        };
        assert_eq!(profile.validate(), Err(ConfigError::EmptyPool));
        assert_eq!(TrafficProfile::default().validate(), Ok(()));
    }
}
