//! Integration of speed and forward travel over one time step.

use super::TimeStep;

/// Moves `speed` towards `target` by the fraction `rate * dt` of the remaining difference. The
/// fraction is clamped to [0, 1] so a large step lands exactly on the target instead of
/// overshooting it.
pub fn approach(speed: f64, target: f64, rate: f64, dt: TimeStep) -> f64 {
    speed + (target - speed) * (rate * dt.as_secs_f64()).clamp(0.0, 1.0)
}

pub fn advance(forward: f64, speed: f64, dt: TimeStep) -> f64 {
    forward + speed * dt.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn dt(seconds: f64) -> TimeStep {
        TimeStep::from_secs_f64(seconds).unwrap()
    }

    #[rstest]
    #[case::accelerate(0.0, 60.0, 2.0, 0.1, 12.0)]
    #[case::boost(0.0, 105.0, 2.0, 0.1, 21.0)]
    #[case::brake(60.0, 0.0, 5.0, 0.1, 30.0)]
    #[case::coast(60.0, 0.0, 0.4, 0.1, 57.6)]
    #[case::saturated(10.0, 60.0, 5.0, 1.0, 60.0)]
    #[case::no_time(10.0, 60.0, 5.0, 0.0, 10.0)]
    fn test_approach(
        #[case] speed: f64,
        #[case] target: f64,
        #[case] rate: f64,
        #[case] seconds: f64,
        #[case] expected: f64,
    ) {
        assert_abs_diff_eq!(
            approach(speed, target, rate, dt(seconds)),
            expected,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_approach_converges() {
        let speed = (0..1000).fold(0.0, |speed, _| approach(speed, 60.0, 2.0, dt(0.1)));
        assert_abs_diff_eq!(speed, 60.0, epsilon = 0.01);
    }

    #[rstest]
    #[case(0.0, 50.0, 0.1, 5.0)]
    #[case(100.0, 0.0, 0.1, 100.0)]
    #[case(100.0, 45.0, 2.0, 190.0)]
    fn test_advance(
        #[case] forward: f64,
        #[case] speed: f64,
        #[case] seconds: f64,
        #[case] expected: f64,
    ) {
        assert_abs_diff_eq!(
            advance(forward, speed, dt(seconds)),
            expected,
            epsilon = EPSILON
        );
    }
}
