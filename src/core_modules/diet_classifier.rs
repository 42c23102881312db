// THEORY:
// The `diet_classifier` module turns a finished hemoglobin estimate into the
// words the user sees: a clinical status and dietary guidance. It is the last
// stage of the pipeline and contains no arithmetic beyond a single cutoff
// comparison; everything else is table lookup keyed by diet preference and
// language.
//
// The cutoff is applied uniformly regardless of age or gender. The reference
// table shown on reports uses gendered thresholds (13.0 male / 12.0 female),
// and the two intentionally disagree; the classification rule is the 11.5
// screening cutoff and nothing else.

use crate::core_modules::hb_estimator::HbValue;
use crate::localization::{self, Language};

/// Hemoglobin values below this are classified as anemic. Strict comparison;
/// a value exactly at the cutoff is Normal.
pub const ANEMIA_CUTOFF: HbValue = 11.5;

/// The clinical screening status of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HbStatus {
    Normal,
    AnemiaDetected,
}

/// The patient's declared diet, selecting which plan variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietPreference {
    Vegetarian,
    NonVegetarian,
}

impl DietPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
        }
    }
}

/// Status plus the localized guidance texts selected for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DietGuidance {
    pub status: HbStatus,
    /// Localized label for `status`.
    pub status_label: &'static str,
    /// Dietary plan for the (diet, language) pair.
    pub plan: &'static str,
    /// Absorption tip for the language.
    pub advice: &'static str,
}

/// Maps a hemoglobin value to a status and guidance texts. Pure lookup; no
/// hidden state, identical inputs always select identical texts.
pub fn classify(hb: HbValue, diet: DietPreference, language: Language) -> DietGuidance {
    let status = if hb < ANEMIA_CUTOFF {
        HbStatus::AnemiaDetected
    } else {
        HbStatus::Normal
    };

    DietGuidance {
        status,
        status_label: localization::status_label(status, language),
        plan: localization::diet_plan(diet, language),
        advice: localization::advice(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_values_are_anemic() {
        let guidance = classify(9.1, DietPreference::Vegetarian, Language::English);
        assert_eq!(guidance.status, HbStatus::AnemiaDetected);
        assert_eq!(guidance.status_label, "Anemia Detected");
    }

    #[test]
    fn the_cutoff_itself_is_normal() {
        let guidance = classify(11.5, DietPreference::Vegetarian, Language::English);
        assert_eq!(guidance.status, HbStatus::Normal);
    }

    #[test]
    fn just_under_the_cutoff_is_anemic() {
        let guidance = classify(11.4, DietPreference::Vegetarian, Language::English);
        assert_eq!(guidance.status, HbStatus::AnemiaDetected);
    }

    #[test]
    fn classification_ignores_diet_and_language() {
        for diet in [DietPreference::Vegetarian, DietPreference::NonVegetarian] {
            for language in [Language::English, Language::Hindi] {
                assert_eq!(classify(12.9, diet, language).status, HbStatus::Normal);
                assert_eq!(
                    classify(10.0, diet, language).status,
                    HbStatus::AnemiaDetected
                );
            }
        }
    }

    #[test]
    fn repeated_calls_select_identical_texts() {
        let first = classify(10.0, DietPreference::NonVegetarian, Language::Hindi);
        let second = classify(10.0, DietPreference::NonVegetarian, Language::Hindi);
        assert_eq!(first, second);
    }
}
