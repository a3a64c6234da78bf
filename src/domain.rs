//! The domain module encapsulates the core business logic. It defines the player's car, the
//! traffic pool and the race that advances both once per frame, along with the rules governing
//! their interactions.
//!
//! By minimizing hard dependencies, this module ensures the business logic remains adaptable and
//! independent of specific implementation details such as rendering or input handling.

mod basis;
mod collision;
mod kinematics;
mod player;
mod race;
mod traffic;
mod vehicle;
mod world;

pub use basis::{Position, TimeStep, TimeStepError};
pub use collision::{BoundingBox, HasCollision, Hit};
pub use player::{Controls, PlayerController, PlayerProfile};
pub use race::{Race, StepReport};
pub use traffic::{TrafficPool, TrafficProfile};
pub use vehicle::{Dimensions, LateralBound, VehicleState};
pub use world::{ConfigError, WorldConfig};
