//! Simulation of the race.
//!
//! Once per frame the player's car is moved according to the held controls, the traffic is moved
//! and recycled, and a crash slows the player down.

use std::env;

use bevy::prelude::*;
use once_cell::sync::Lazy;
use rand::Rng;

use crate::{
    domain::{StepReport, TimeStep},
    resource::{ControlsRes, RaceRes, RngRes},
};

/// Environment variable holding the seed of the traffic's random source.
pub const SEED_VARIABLE: &str = "DODGE_RACE_SEED";

static SEED: Lazy<u64> = Lazy::new(|| {
    env::var(SEED_VARIABLE)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| rand::rng().random())
});

pub fn seed() -> u64 {
    *SEED
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSet;

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, announce)
            .add_systems(Update, simulate.in_set(SimulationSet));
    }
}

fn announce(race: Res<RaceRes>) {
    info!(
        "starting race with {} cars, seed {} (set {} to replay)",
        race.config().cars_racing(),
        seed(),
        SEED_VARIABLE
    );
}

fn simulate(
    time: Res<Time>,
    controls: Res<ControlsRes>,
    mut race: ResMut<RaceRes>,
    mut rng: ResMut<RngRes>,
) {
    let dt = TimeStep::from_secs_f64(time.delta_seconds_f64()).unwrap_or_else(|error| {
        warn!("skipping frame: {error}");
        TimeStep::ZERO
    });

    let report = race.step(&controls, dt, &mut **rng);
    log_step(&report, race.config().cars_racing());
}

fn log_step(report: &StepReport, cars_racing: usize) {
    if report.clamped {
        debug!(
            "time step limited to {:.3} s",
            report.dt.as_secs_f64()
        );
    }

    if report.recycled > 0 {
        debug!("recycled {} cars", report.recycled);
    }

    if let Some(hit) = report.hit {
        info!(
            "CRASH with car {}! Speed reduced from {:.1} to {:.1}. Total players still racing: {}",
            hit.index, report.speed_before_penalty, report.speed, cars_racing
        );
    }
}
