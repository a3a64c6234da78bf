//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;
use rand_chacha::ChaCha8Rng;

use crate::domain;

#[derive(Resource)]
pub struct RaceRes(domain::Race);

impl Deref for RaceRes {
    type Target = domain::Race;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RaceRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Race> for RaceRes {
    fn from(value: domain::Race) -> Self {
        Self(value)
    }
}

#[derive(Resource, Default)]
pub struct ControlsRes(domain::Controls);

impl Deref for ControlsRes {
    type Target = domain::Controls;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ControlsRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Random source of the traffic. Seeded once per process so a run can be replayed.
#[derive(Resource)]
pub struct RngRes(ChaCha8Rng);

impl Deref for RngRes {
    type Target = ChaCha8Rng;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RngRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<ChaCha8Rng> for RngRes {
    fn from(value: ChaCha8Rng) -> Self {
        Self(value)
    }
}
