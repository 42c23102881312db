// THEORY:
// The `hb_estimator` module provides the comparative analysis at the heart of
// the engine. A measurement sample is meaningless on its own: the absolute
// color of an eyelid photograph is dominated by the phone's exposure and white
// balance. Its value is in its relationship to a reference sample taken from
// the same photograph.
//
// Key architectural principles:
// 1.  **Comparative Analysis**: The core method takes two samples. Dividing
//     each measurement channel by the matching reference channel cancels the
//     per-photo lighting and white-balance variation, leaving a normalized
//     redness signal.
// 2.  **Guarded Arithmetic**: Every denominator carries a small epsilon so a
//     zero channel mean degrades into a bounded, clamped number instead of a
//     runtime fault. The guard is invisible to callers.
// 3.  **Fixed Calibration**: The linear map from redness ratio to g/dL and the
//     clamp range are hand-calibrated constants. They are reproduced exactly;
//     output parity with the calibration sessions depends on it.
//
// The estimator does not validate its inputs. Callers validate the measurement
// region first and refuse to estimate on anything that is not tissue.

use crate::core_modules::roi::roi::ColorSample;

pub type HbValue = f64;

/// Lower bound of any reported estimate, in g/dL.
pub const HB_FLOOR: HbValue = 6.0;
/// Upper bound of any reported estimate, in g/dL.
pub const HB_CEILING: HbValue = 16.5;

const RATIO_EPSILON: f64 = 1e-6;
const CALIBRATION_OFFSET: f64 = 2.0;
const CALIBRATION_SLOPE: f64 = 6.0;

/// Estimates a hemoglobin concentration from one eye's reference and
/// measurement samples. Deterministic; always within [HB_FLOOR, HB_CEILING].
pub fn estimate(reference: &ColorSample, measurement: &ColorSample) -> HbValue {
    let r = measurement.red / (reference.red + RATIO_EPSILON);
    let g = measurement.green / (reference.green + RATIO_EPSILON);
    let b = measurement.blue / (reference.blue + RATIO_EPSILON);

    // Redness relative to the reference white balance.
    let ratio = r / ((g + b) / 2.0 + RATIO_EPSILON);

    clamp(CALIBRATION_OFFSET + ratio * CALIBRATION_SLOPE)
}

/// Restricts a raw estimate to the reportable range. Idempotent.
pub fn clamp(value: HbValue) -> HbValue {
    value.clamp(HB_FLOOR, HB_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_tissue_example() {
        let reference = ColorSample::new(200.0, 190.0, 185.0);
        let measurement = ColorSample::new(180.0, 90.0, 95.0);
        let hb = estimate(&reference, &measurement);
        assert!((hb - 12.94).abs() < 0.01, "unexpected estimate {hb}");
    }

    #[test]
    fn pale_tissue_example() {
        let reference = ColorSample::new(210.0, 205.0, 200.0);
        let measurement = ColorSample::new(150.0, 120.0, 125.0);
        let hb = estimate(&reference, &measurement);
        assert!((hb - 9.08).abs() < 0.01, "unexpected estimate {hb}");
    }

    #[test]
    fn estimate_is_deterministic() {
        let reference = ColorSample::new(200.0, 190.0, 185.0);
        let measurement = ColorSample::new(180.0, 90.0, 95.0);
        let first = estimate(&reference, &measurement);
        let second = estimate(&reference, &measurement);
        assert_eq!(first, second);
    }

    #[test]
    fn extreme_redness_is_clamped_to_the_ceiling() {
        let reference = ColorSample::new(255.0, 255.0, 255.0);
        let measurement = ColorSample::new(255.0, 1.0, 1.0);
        assert_eq!(estimate(&reference, &measurement), HB_CEILING);
    }

    #[test]
    fn absent_redness_is_clamped_to_the_floor() {
        let reference = ColorSample::new(255.0, 255.0, 255.0);
        let measurement = ColorSample::new(1.0, 255.0, 255.0);
        assert_eq!(estimate(&reference, &measurement), HB_FLOOR);
    }

    #[test]
    fn zero_reference_channels_do_not_fault() {
        let reference = ColorSample::new(0.0, 0.0, 0.0);
        let measurement = ColorSample::new(120.0, 60.0, 60.0);
        let hb = estimate(&reference, &measurement);
        assert!((HB_FLOOR..=HB_CEILING).contains(&hb));
    }

    #[test]
    fn clamp_is_idempotent() {
        for value in [-3.0, 6.0, 11.5, 16.5, 42.0] {
            assert_eq!(clamp(clamp(value)), clamp(value));
        }
    }
}
