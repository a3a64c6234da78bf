//! The player's car: throttle, brake, boost and steering applied to a vehicle state.

use super::{kinematics, Position, TimeStep, VehicleState};

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerController {
    vehicle: VehicleState,
    profile: PlayerProfile,
}

impl PlayerController {
    pub fn new(vehicle: VehicleState, profile: PlayerProfile) -> Self {
        Self { vehicle, profile }
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn update(&mut self, controls: &Controls, dt: TimeStep) {
        self.vehicle = drive(&self.vehicle, &self.profile, controls, dt);
    }

    /// Slows the car down after a crash. Applied once per tick with an overlap, so a car that
    /// keeps scraping along another one keeps losing speed.
    pub fn apply_collision_penalty(&mut self) {
        self.vehicle
            .set_speed(self.vehicle.speed() * self.profile.crash_penalty_factor);
    }
}

/// Computes the player's next vehicle state.
///
/// Longitudinal control has a fixed priority: forward wins over back, back wins over coasting.
/// Boost only raises the target speed while forward is held.
pub fn drive(
    vehicle: &VehicleState,
    profile: &PlayerProfile,
    controls: &Controls,
    dt: TimeStep,
) -> VehicleState {
    let target = if controls.boost {
        profile.boost_max_speed
    } else {
        profile.normal_max_speed
    };

    let speed = if controls.forward {
        kinematics::approach(vehicle.speed(), target, profile.accel_rate, dt)
    } else if controls.back {
        kinematics::approach(vehicle.speed(), 0.0, profile.decel_rate, dt)
    } else {
        kinematics::approach(vehicle.speed(), 0.0, profile.idle_rate, dt)
    };

    let position = vehicle.position();
    let lateral = position.lateral() + controls.steer() * profile.steering_rate * dt.as_secs_f64();
    let forward = kinematics::advance(position.forward(), speed, dt);

    let mut next = vehicle.clone();
    next.set_speed(speed);
    next.set_position(Position::new(lateral, forward));
    next
}

/// Held controls of one frame, independent of the physical keys behind them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl Controls {
    /// -1 steers left, 1 steers right, opposing inputs cancel out.
    pub fn steer(&self) -> f64 {
        f64::from(i8::from(self.right) - i8::from(self.left))
    }
}

/// Speeds are in units per second, rates in 1/s.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub normal_max_speed: f64,
    pub boost_max_speed: f64,
    pub accel_rate: f64,
    pub decel_rate: f64,
    pub idle_rate: f64,
    pub crash_penalty_factor: f64,
    pub steering_rate: f64,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            normal_max_speed: 60.0,
            boost_max_speed: 105.0,
            accel_rate: 2.0,
            decel_rate: 5.0,
            idle_rate: 0.4,
            crash_penalty_factor: 0.2,
            steering_rate: 18.0,
        }
    }
}
