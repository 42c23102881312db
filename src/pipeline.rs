// THEORY:
// The `pipeline` module is the final, top-level API for the screening engine.
// It encapsulates the full stack — region validation, per-eye estimation,
// two-eye combination, and classification — behind a single entry point that
// takes one patient's four regions and returns one immutable result.
//
// The pipeline is a stateless, synchronous, pure computation over its inputs:
// identical regions always produce the identical result. Validation runs
// before any estimation, and a rejection from either eye halts the run with
// the per-eye reasons; no partial estimate ever escapes.

use crate::core_modules::hb_estimator::{self, HbValue};
use crate::core_modules::region_validator;
use crate::core_modules::roi::roi::Roi;
use crate::error::{EyeRejections, ScreeningError};

// Re-export key data structures for the public API.
pub use crate::core_modules::diet_classifier::{DietGuidance, DietPreference, HbStatus, classify};
pub use crate::core_modules::region_validator::RegionVerdict;
pub use crate::core_modules::roi::roi::{ColorSample, RegionRect};
pub use crate::localization::Language;

/// Patient gender. Threaded through to records and reports; never interpreted
/// by the numeric pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// The patient identity supplied with a screening run.
#[derive(Debug, Clone)]
pub struct PatientProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub diet: DietPreference,
}

impl PatientProfile {
    /// The name as shown on reports, with surrounding whitespace removed.
    pub fn display_name(&self) -> String {
        self.name.trim().to_string()
    }

    /// The lowercase trimmed name used as the history key.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One eye's pair of selected regions. Both must come from the same
/// photograph of the same eye; the pipeline cannot verify that pairing.
pub struct EyeRegions {
    /// The white/sclera patch used for lighting normalization.
    pub reference: Roi,
    /// The reddish inner-eyelid patch whose color is measured.
    pub measurement: Roi,
}

/// The immutable outcome of one screening run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreeningResult {
    /// Final hemoglobin estimate in g/dL, rounded to one decimal.
    pub hb_value: HbValue,
    pub status: HbStatus,
    /// Localized label for `status`.
    pub status_label: &'static str,
    /// Localized dietary plan for the patient's diet preference.
    pub diet_plan: &'static str,
    /// Localized absorption tip.
    pub advice: &'static str,
}

/// The main, top-level struct for the screening engine.
pub struct ScreeningPipeline {
    language: Language,
}

impl ScreeningPipeline {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Runs one full screening: validate both measurement regions, estimate
    /// each eye, average, round, classify.
    pub fn analyze(
        &self,
        patient: &PatientProfile,
        left: &EyeRegions,
        right: &EyeRegions,
    ) -> Result<ScreeningResult, ScreeningError> {
        if !patient.has_identity() {
            return Err(ScreeningError::InputMissing);
        }

        // Stage 1: Region Validation
        let left_measurement = left.measurement.mean_color();
        let right_measurement = right.measurement.mean_color();
        let left_verdict = region_validator::validate(&left_measurement);
        let right_verdict = region_validator::validate(&right_measurement);
        if !left_verdict.is_valid() || !right_verdict.is_valid() {
            let rejections = EyeRejections {
                left: (!left_verdict.is_valid()).then_some(left_verdict),
                right: (!right_verdict.is_valid()).then_some(right_verdict),
            };
            tracing::warn!(%rejections, "measurement region rejected");
            return Err(ScreeningError::RegionInvalid(rejections));
        }

        // Stage 2: Per-Eye Estimation
        let left_hb = hb_estimator::estimate(&left.reference.mean_color(), &left_measurement);
        let right_hb = hb_estimator::estimate(&right.reference.mean_color(), &right_measurement);
        tracing::debug!(left_hb, right_hb, "per-eye estimates");

        // Stage 3: Two-Eye Combination
        // Unweighted arithmetic mean; a single round to one decimal afterward.
        let hb_value = round_to_tenth((left_hb + right_hb) / 2.0);

        // Stage 4: Classification
        let guidance = classify(hb_value, patient.diet, self.language);
        tracing::info!(
            hb_value,
            status = guidance.status_label,
            "screening complete"
        );

        Ok(ScreeningResult {
            hb_value,
            status: guidance.status,
            status_label: guidance.status_label,
            diet_plan: guidance.plan,
            advice: guidance.advice,
        })
    }
}

fn round_to_tenth(value: HbValue) -> HbValue {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;

    fn uniform_roi(red: u8, green: u8, blue: u8) -> Roi {
        Roi::new(2, 2, vec![Pixel::new(red, green, blue, 255); 4])
    }

    fn eye(reference: (u8, u8, u8), measurement: (u8, u8, u8)) -> EyeRegions {
        EyeRegions {
            reference: uniform_roi(reference.0, reference.1, reference.2),
            measurement: uniform_roi(measurement.0, measurement.1, measurement.2),
        }
    }

    fn patient(name: &str) -> PatientProfile {
        PatientProfile {
            name: name.to_string(),
            age: 25,
            gender: Gender::Female,
            diet: DietPreference::Vegetarian,
        }
    }

    #[test]
    fn healthy_regions_produce_a_normal_result() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((200, 190, 185), (180, 90, 95));
        let right = eye((200, 190, 185), (180, 90, 95));

        let result = pipeline.analyze(&patient("Asha"), &left, &right).unwrap();
        assert_eq!(result.hb_value, 12.9);
        assert_eq!(result.status, HbStatus::Normal);
        assert_eq!(result.status_label, "Normal");
    }

    #[test]
    fn pale_regions_produce_an_anemic_result() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((210, 205, 200), (150, 120, 125));
        let right = eye((210, 205, 200), (150, 120, 125));

        let result = pipeline.analyze(&patient("Ravi"), &left, &right).unwrap();
        assert_eq!(result.hb_value, 9.1);
        assert_eq!(result.status, HbStatus::AnemiaDetected);
    }

    #[test]
    fn the_two_eyes_are_averaged_without_weighting() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((200, 190, 185), (180, 90, 95)); // ~12.94
        let right = eye((210, 205, 200), (150, 120, 125)); // ~9.08

        let result = pipeline.analyze(&patient("Meera"), &left, &right).unwrap();
        assert_eq!(result.hb_value, 11.0);
        assert_eq!(result.status, HbStatus::AnemiaDetected);
    }

    #[test]
    fn a_green_dominant_measurement_halts_the_run() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((200, 190, 185), (90, 100, 50));
        let right = eye((200, 190, 185), (180, 90, 95));

        let error = pipeline
            .analyze(&patient("Asha"), &left, &right)
            .unwrap_err();
        match error {
            ScreeningError::RegionInvalid(rejections) => {
                assert_eq!(rejections.left, Some(RegionVerdict::InvalidColor));
                assert_eq!(rejections.right, None);
            }
            other => panic!("expected RegionInvalid, got {other:?}"),
        }
    }

    #[test]
    fn rejections_carry_both_eyes_when_both_fail() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((200, 190, 185), (10, 10, 10));
        let right = eye((200, 190, 185), (250, 250, 250));

        let error = pipeline
            .analyze(&patient("Asha"), &left, &right)
            .unwrap_err();
        match error {
            ScreeningError::RegionInvalid(rejections) => {
                assert_eq!(rejections.left, Some(RegionVerdict::TooDark));
                assert_eq!(rejections.right, Some(RegionVerdict::TooBright));
            }
            other => panic!("expected RegionInvalid, got {other:?}"),
        }
    }

    #[test]
    fn a_blank_name_halts_before_any_color_math() {
        let pipeline = ScreeningPipeline::new(Language::English);
        let left = eye((200, 190, 185), (180, 90, 95));
        let right = eye((200, 190, 185), (180, 90, 95));

        let error = pipeline
            .analyze(&patient("   "), &left, &right)
            .unwrap_err();
        assert_eq!(error, ScreeningError::InputMissing);
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let pipeline = ScreeningPipeline::new(Language::Hindi);
        let left = eye((200, 190, 185), (180, 90, 95));
        let right = eye((210, 205, 200), (150, 120, 125));

        let first = pipeline.analyze(&patient("Asha"), &left, &right).unwrap();
        let second = pipeline.analyze(&patient("Asha"), &left, &right).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn normalized_name_is_trimmed_and_lowercased() {
        let profile = patient("  Asha Verma ");
        assert_eq!(profile.normalized_name(), "asha verma");
        assert_eq!(profile.display_name(), "Asha Verma");
    }
}
