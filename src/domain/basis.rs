//! Basic building blocks.

use std::ops::Add;

use thiserror::Error;

/// Point on the road plane. `lateral` runs across the road (positive to the right), `forward`
/// runs along it in driving direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    lateral: f64,
    forward: f64,
}

impl Position {
    pub const fn new(lateral: f64, forward: f64) -> Self {
        Self { lateral, forward }
    }

    pub fn lateral(&self) -> f64 {
        self.lateral
    }

    pub fn forward(&self) -> f64 {
        self.forward
    }

    pub fn with_lateral(self, lateral: f64) -> Self {
        Self { lateral, ..self }
    }

    pub fn with_forward(self, forward: f64) -> Self {
        Self { forward, ..self }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            lateral: self.lateral + rhs.lateral,
            forward: self.forward + rhs.forward,
        }
    }
}

/// Elapsed simulation time of one frame in seconds. Always finite and non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct TimeStep(f64);

impl TimeStep {
    pub const ZERO: TimeStep = TimeStep(0.0);

    pub fn from_secs_f64(seconds: f64) -> Result<Self, TimeStepError> {
        if !seconds.is_finite() {
            Err(TimeStepError::NonFinite(seconds))
        } else if seconds < 0.0 {
            Err(TimeStepError::Negative(seconds))
        } else {
            Ok(Self(seconds))
        }
    }

    /// Limits the step to `max` seconds so that a stalled frame cannot move a vehicle through
    /// another one.
    pub fn clamped(self, max: f64) -> Self {
        Self(self.0.min(max.max(0.0)))
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TimeStepError {
    #[error("negative time step {0}")]
    Negative(f64),
    #[error("non-finite time step {0}")]
    NonFinite(f64),
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, AbsDiffEq};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_position() {
        let position = Position::new(1.0, 2.0);
        assert_abs_diff_eq!(position.lateral(), 1.0);
        assert_abs_diff_eq!(position.forward(), 2.0);
        assert_abs_diff_eq!(
            position + Position::new(-0.5, 3.0),
            Position::new(0.5, 5.0)
        );
    }

    #[rstest]
    #[case::zero(0.0, 0.0)]
    #[case::small(0.016, 0.016)]
    #[case::at_limit(0.1, 0.1)]
    #[case::stall(2.5, 0.1)]
    fn test_time_step_clamped(#[case] seconds: f64, #[case] expected: f64) {
        let dt = TimeStep::from_secs_f64(seconds).unwrap().clamped(0.1);
        assert_abs_diff_eq!(dt.as_secs_f64(), expected);
    }

    #[test]
    fn test_time_step_rejects_negative() {
        assert_eq!(
            TimeStep::from_secs_f64(-0.5),
            Err(TimeStepError::Negative(-0.5))
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_time_step_rejects_non_finite(#[case] seconds: f64) {
        assert!(matches!(
            TimeStep::from_secs_f64(seconds),
            Err(TimeStepError::NonFinite(_))
        ));
    }

    impl AbsDiffEq for Position {
        type Epsilon = f64;

        fn default_epsilon() -> f64 {
            f64::EPSILON
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            f64::abs_diff_eq(&self.lateral, &other.lateral, epsilon)
                && f64::abs_diff_eq(&self.forward, &other.forward, epsilon)
        }
    }
}
