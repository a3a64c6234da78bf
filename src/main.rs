use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;


mod controller;
mod domain;
mod resource;
mod simulator;
mod visualizer;

use crate::{
    domain::{ConfigError, Race, WorldConfig},
    resource::{RaceRes, RngRes},
};

fn main() -> Result<(), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(simulator::seed());
    let race = Race::new(WorldConfig::default(), &mut rng)?;

    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(RaceRes::from(race))
        .insert_resource(RngRes::from(rng))
        .add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer)
        .add_plugins(simulator::Simulator)
        .run();

    Ok(())
}
