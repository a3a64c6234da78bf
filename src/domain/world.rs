//! Static description of the world the race takes place in. Built once at startup.

use thiserror::Error;

use super::{Dimensions, LateralBound, PlayerProfile, TrafficProfile};

#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub road_length: f64,
    pub road_width: f64,
    pub grass_width: f64,
    pub lateral_bound: LateralBound,
    pub dimensions: Dimensions,
    /// Longest time step integrated in one frame, in seconds.
    pub max_time_step: f64,
    pub player: PlayerProfile,
    pub traffic: TrafficProfile,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        for (name, value) in [
            ("road_length", self.road_length),
            ("road_width", self.road_width),
            ("grass_width", self.grass_width),
            ("width", self.dimensions.width),
            ("height", self.dimensions.height),
            ("length", self.dimensions.length),
            ("max_time_step", self.max_time_step),
            ("normal_max_speed", player.normal_max_speed),
            ("boost_max_speed", player.boost_max_speed),
            ("accel_rate", player.accel_rate),
            ("decel_rate", player.decel_rate),
            ("idle_rate", player.idle_rate),
            ("crash_penalty_factor", player.crash_penalty_factor),
            ("steering_rate", player.steering_rate),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.lateral_bound.min > self.lateral_bound.max {
            return Err(ConfigError::InvertedRange {
                name: "lateral_bound",
                min: self.lateral_bound.min,
                max: self.lateral_bound.max,
            });
        }

        self.traffic.validate()
    }

    /// Number of cars on the road including the player's.
    pub fn cars_racing(&self) -> usize {
        self.traffic.pool_size + 1
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            road_length: 10000.0,
            road_width: 20.0,
            grass_width: 800.0,
            lateral_bound: LateralBound::default(),
            dimensions: Dimensions::default(),
            max_time_step: 0.1,
            player: PlayerProfile::default(),
            traffic: TrafficProfile::default(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("range {name} is empty or not finite ({min}..={max})")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("traffic pool must hold at least one car")]
    EmptyPool,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}
