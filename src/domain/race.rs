//! One race: the player's car, the traffic around it and the order in which a frame updates them.

use rand::Rng;

use super::{
    collision, ConfigError, Controls, Hit, PlayerController, Position, TimeStep, TrafficPool,
    VehicleState, WorldConfig,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Race {
    config: WorldConfig,
    player: PlayerController,
    traffic: TrafficPool,
    crashes: u64,
    recycled: u64,
}

impl Race {
    /// Starts a race with the player standing at the origin and the traffic scattered ahead.
    pub fn new<R: Rng>(config: WorldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = PlayerController::new(
            VehicleState::new(
                Position::default(),
                0.0,
                config.lateral_bound,
                config.dimensions,
            ),
            config.player.clone(),
        );
        let traffic = TrafficPool::new(
            config.traffic.clone(),
            config.lateral_bound,
            config.dimensions,
            rng,
        )?;

        Ok(Self::from_parts(config, player, traffic))
    }

    pub fn from_parts(config: WorldConfig, player: PlayerController, traffic: TrafficPool) -> Self {
        Self {
            config,
            player,
            traffic,
            crashes: 0,
            recycled: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn traffic(&self) -> &TrafficPool {
        &self.traffic
    }

    /// Number of frames in which the player was penalized for a crash.
    pub fn crashes(&self) -> u64 {
        self.crashes
    }

    /// Total number of recycled traffic cars.
    pub fn recycled(&self) -> u64 {
        self.recycled
    }

    /// Advances the race by one frame.
    ///
    /// The player moves first, then the traffic (recycled against the player's new position),
    /// then the player's new position is tested for crashes. A crash costs speed on every frame
    /// in which the cars overlap.
    pub fn step<R: Rng>(&mut self, controls: &Controls, dt: TimeStep, rng: &mut R) -> StepReport {
        let requested = dt;
        let dt = dt.clamped(self.config.max_time_step);

        self.player.update(controls, dt);

        let player_forward = self.player.vehicle().position().forward();
        let recycled = self.traffic.update(player_forward, dt, rng);
        self.recycled += recycled as u64;

        let hit = collision::detect(self.player.vehicle(), self.traffic.vehicles());
        let speed_before_penalty = self.player.vehicle().speed();
        if hit.is_some() {
            self.player.apply_collision_penalty();
            self.crashes += 1;
        }

        StepReport {
            dt,
            clamped: dt != requested,
            recycled,
            hit,
            speed_before_penalty,
            speed: self.player.vehicle().speed(),
        }
    }
}

/// Outcome of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Time step that was actually integrated.
    pub dt: TimeStep,
    pub clamped: bool,
    pub recycled: usize,
    pub hit: Option<Hit>,
    pub speed_before_penalty: f64,
    pub speed: f64,
}
