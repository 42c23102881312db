// THEORY:
// The `region_validator` module is the gatekeeper of the screening engine. A
// user-selected region is only worth estimating if its average color plausibly
// depicts reddish conjunctival tissue; everything else (shadow, glare, skin,
// background) must be rejected with a reason the user can act on.
//
// Key architectural principles:
// 1.  **Ordered Rule Chain**: Classification is a fixed sequence of
//     (predicate, verdict) rules evaluated first-match-wins. Later rules are
//     only meaningful because earlier ones did not match, so the order is as
//     much a part of the contract as the thresholds themselves.
// 2.  **Tagged Verdict**: An invalid region is an expected, frequent outcome,
//     not an exceptional one. The result is a plain enum, never an error path.
// 3.  **Empirical Constants**: The thresholds were fixed against real capture
//     sessions. They are named constants on the byte scale and are not
//     configurable at runtime.
//
// The validator judges a `ColorSample`, not a `Roi`: the mean is computed once
// by the caller and shared with the estimator.

use crate::core_modules::roi::roi::ColorSample;

const DARK_CHANNEL_CEILING: f64 = 60.0;
const BRIGHT_CHANNEL_FLOOR: f64 = 190.0;
const MIN_RED_GREEN_GAP: f64 = 17.0;

/// The verdict for a single user-selected region, based on its mean color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionVerdict {
    /// The region is red-dominant tissue and can be measured.
    Valid,
    /// All channels are near black; likely pupil or eyelash shadow.
    TooDark,
    /// All channels are near white; likely sclera glare or overexposure.
    TooBright,
    /// The region is not red-dominant; likely background or clothing.
    InvalidColor,
    /// Red barely exceeds green; typical of skin rather than conjunctiva.
    SkinToneDetected,
    /// Safety fallback; unreachable given the prior rules but retained.
    UnknownObject,
}

impl RegionVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, RegionVerdict::Valid)
    }

    /// Stable human-readable label, used in rejection reasons and records.
    pub fn description(&self) -> &'static str {
        match self {
            RegionVerdict::Valid => "Valid",
            RegionVerdict::TooDark => "Too Dark",
            RegionVerdict::TooBright => "Too Bright",
            RegionVerdict::InvalidColor => "Invalid Color",
            RegionVerdict::SkinToneDetected => "Skin Tone Detected",
            RegionVerdict::UnknownObject => "Unknown Object",
        }
    }
}

impl std::fmt::Display for RegionVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Classifies whether a region's mean color plausibly depicts conjunctival
/// tissue. First matching rule wins.
pub fn validate(sample: &ColorSample) -> RegionVerdict {
    let (r, g, b) = (sample.red, sample.green, sample.blue);

    if r < DARK_CHANNEL_CEILING && g < DARK_CHANNEL_CEILING && b < DARK_CHANNEL_CEILING {
        return RegionVerdict::TooDark;
    }
    if r > BRIGHT_CHANNEL_FLOOR && g > BRIGHT_CHANNEL_FLOOR && b > BRIGHT_CHANNEL_FLOOR {
        return RegionVerdict::TooBright;
    }
    if g >= r || b >= r {
        return RegionVerdict::InvalidColor;
    }
    if (r - g) < MIN_RED_GREEN_GAP {
        return RegionVerdict::SkinToneDetected;
    }
    if r > g && r > b {
        return RegionVerdict::Valid;
    }
    RegionVerdict::UnknownObject
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(r: f64, g: f64, b: f64) -> ColorSample {
        ColorSample::new(r, g, b)
    }

    #[test]
    fn near_black_regions_are_too_dark() {
        assert_eq!(validate(&sample(10.0, 20.0, 30.0)), RegionVerdict::TooDark);
        assert_eq!(validate(&sample(59.9, 59.9, 59.9)), RegionVerdict::TooDark);
    }

    #[test]
    fn darkness_rule_wins_over_later_rules() {
        // Green-dominant but dark: the first rule must claim it.
        assert_eq!(validate(&sample(20.0, 50.0, 10.0)), RegionVerdict::TooDark);
    }

    #[test]
    fn channels_at_the_dark_boundary_are_not_dark() {
        // 60 is not < 60; this sample falls through to the dominance rule.
        assert_eq!(
            validate(&sample(60.0, 60.0, 60.0)),
            RegionVerdict::InvalidColor
        );
    }

    #[test]
    fn near_white_regions_are_too_bright() {
        assert_eq!(
            validate(&sample(250.0, 245.0, 240.0)),
            RegionVerdict::TooBright
        );
    }

    #[test]
    fn channels_at_the_bright_boundary_are_not_bright() {
        // 190 is not > 190; equal channels then fail red dominance.
        assert_eq!(
            validate(&sample(190.0, 190.0, 190.0)),
            RegionVerdict::InvalidColor
        );
    }

    #[test]
    fn non_red_dominant_regions_are_invalid_color() {
        assert_eq!(
            validate(&sample(90.0, 100.0, 50.0)),
            RegionVerdict::InvalidColor
        );
        assert_eq!(
            validate(&sample(90.0, 50.0, 100.0)),
            RegionVerdict::InvalidColor
        );
        // Ties count as non-dominant.
        assert_eq!(
            validate(&sample(90.0, 90.0, 50.0)),
            RegionVerdict::InvalidColor
        );
    }

    #[test]
    fn weakly_saturated_red_reads_as_skin() {
        assert_eq!(
            validate(&sample(100.0, 90.0, 80.0)),
            RegionVerdict::SkinToneDetected
        );
        // A gap just under the threshold still reads as skin.
        assert_eq!(
            validate(&sample(100.0, 83.1, 80.0)),
            RegionVerdict::SkinToneDetected
        );
    }

    #[test]
    fn a_gap_at_the_threshold_is_tissue() {
        assert_eq!(validate(&sample(100.0, 83.0, 80.0)), RegionVerdict::Valid);
    }

    #[test]
    fn saturated_red_tissue_is_valid() {
        assert_eq!(validate(&sample(180.0, 90.0, 95.0)), RegionVerdict::Valid);
    }
}
