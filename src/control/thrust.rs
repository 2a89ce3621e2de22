use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Saturating thrust law (single axis)
// ---------------------------------------------------------------------------

/// Thrust output for one axis from the velocity error on that axis.
///
/// `(2 * max_thrust / pi) * atan(velocity_error * responsiveness)`
///
/// The arctangent keeps the output strictly inside `(-max_thrust,
/// max_thrust)` for any finite error while staying smooth through zero —
/// no discontinuity at a saturation boundary, unlike a hard linear clamp.
/// Higher `responsiveness` steepens the small-error slope
/// (`2 * max_thrust * responsiveness / pi` near zero) and moves the
/// saturation knee closer to zero error.
///
/// A zero or negative `max_thrust` gives a degenerate (zero or
/// sign-flipped) output; callers are expected to configure positive
/// ceilings.
pub fn calc_thrust(max_thrust: f64, responsiveness: f64, velocity_error: f64) -> f64 {
    let double_max_over_pi = 2.0 * max_thrust / PI;
    double_max_over_pi * (velocity_error * responsiveness).atan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_error_zero_output() {
        assert_eq!(calc_thrust(800.0, 3.0, 0.0), 0.0);
        assert_eq!(calc_thrust(0.2, 1000.0, 0.0), 0.0);
    }

    #[test]
    fn odd_symmetry() {
        for e in [0.01, 1.0, 42.0, 1600.0, 1e6] {
            let pos = calc_thrust(800.0, 3.0, e);
            let neg = calc_thrust(800.0, 3.0, -e);
            assert_relative_eq!(pos, -neg, max_relative = 1e-15);
        }
    }

    #[test]
    fn bounded_by_max_thrust() {
        for e in [1e-3, 1.0, 100.0, 1e6, 1e12] {
            let out = calc_thrust(500.0, 3.0, e);
            assert!(out < 500.0, "output {} must stay below ceiling for e={}", out, e);
            assert!(out > 0.0);
        }
    }

    #[test]
    fn strictly_increasing_in_error() {
        let errors = [-1e4, -100.0, -1.0, -0.01, 0.0, 0.01, 1.0, 100.0, 1e4];
        let outputs: Vec<f64> = errors.iter().map(|&e| calc_thrust(800.0, 3.0, e)).collect();
        for pair in outputs.windows(2) {
            assert!(pair[1] > pair[0], "output must rise with error: {:?}", pair);
        }
    }

    #[test]
    fn near_linear_at_small_error() {
        let max = 800.0;
        let resp = 3.0;
        let e = 1e-6;
        let slope = calc_thrust(max, resp, e) / e;
        assert_relative_eq!(slope, 2.0 * max * resp / PI, max_relative = 1e-6);
    }

    #[test]
    fn large_error_approaches_ceiling() {
        // 10_000x a typical full-throttle error still stays under the ceiling.
        let out = calc_thrust(800.0, 3.0, 4800.0 * 10_000.0);
        assert!(out < 800.0);
        assert!(out > 800.0 * 0.9999, "should be within 0.01% of ceiling, got {}", out);
    }

    #[test]
    fn degenerate_ceiling_accepted() {
        assert_eq!(calc_thrust(0.0, 3.0, 100.0), 0.0);
        let flipped = calc_thrust(-800.0, 3.0, 100.0);
        assert!(flipped < 0.0, "negative ceiling flips sign, not panics");
    }
}
