// THEORY:
// The `report` module is the rendering collaborator: it receives one finished
// `ScreeningResult` plus the patient identity and assembles the document the
// user keeps. The document is a plain data structure first and a rendering
// second, so hosts can serialize it (JSON) or print it (text) without
// re-deriving any content.
//
// Two blocks are fixed on every report regardless of outcome: the biological
// reference table and the medical disclaimer. The reference table shows the
// gendered laboratory ranges even though classification uses the uniform
// screening cutoff; the discrepancy is part of the preserved behavior.

use serde::Serialize;

use crate::localization::{self, Language};
use crate::pipeline::{PatientProfile, ScreeningResult};

/// Laboratory reference range shown on every report: Adult Male.
pub const MALE_RANGE_G_DL: (f64, f64) = (13.0, 17.0);
/// Laboratory anemia threshold shown for Adult Male.
pub const MALE_ANEMIA_BELOW_G_DL: f64 = 13.0;
/// Laboratory reference range shown on every report: Adult Female.
pub const FEMALE_RANGE_G_DL: (f64, f64) = (12.0, 15.0);
/// Laboratory anemia threshold shown for Adult Female.
pub const FEMALE_ANEMIA_BELOW_G_DL: f64 = 12.0;

/// One row of the biological reference table.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceRow {
    pub group: String,
    pub low_g_dl: f64,
    pub high_g_dl: f64,
    pub anemia_below_g_dl: f64,
}

/// The complete, self-contained report for one screening run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub language: Language,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub diet: String,
    pub hb_value: f64,
    pub status: String,
    pub diet_plan: String,
    pub advice: String,
    pub reference_ranges: Vec<ReferenceRow>,
    pub disclaimer: String,
}

impl ReportDocument {
    /// Assembles the document from a finished result. All localized content
    /// is resolved here; rendering afterwards is purely mechanical.
    pub fn assemble(
        patient: &PatientProfile,
        result: &ScreeningResult,
        language: Language,
    ) -> Self {
        let strings = localization::report_strings(language);
        Self {
            language,
            name: patient.display_name(),
            age: patient.age,
            gender: patient.gender.as_str().to_string(),
            diet: patient.diet.as_str().to_string(),
            hb_value: result.hb_value,
            status: result.status_label.to_string(),
            diet_plan: result.diet_plan.to_string(),
            advice: result.advice.to_string(),
            reference_ranges: vec![
                ReferenceRow {
                    group: strings.male_range_label.to_string(),
                    low_g_dl: MALE_RANGE_G_DL.0,
                    high_g_dl: MALE_RANGE_G_DL.1,
                    anemia_below_g_dl: MALE_ANEMIA_BELOW_G_DL,
                },
                ReferenceRow {
                    group: strings.female_range_label.to_string(),
                    low_g_dl: FEMALE_RANGE_G_DL.0,
                    high_g_dl: FEMALE_RANGE_G_DL.1,
                    anemia_below_g_dl: FEMALE_ANEMIA_BELOW_G_DL,
                },
            ],
            disclaimer: strings.disclaimer.to_string(),
        }
    }

    /// Renders the printable text document.
    pub fn render_text(&self) -> String {
        let strings = localization::report_strings(self.language);
        let mut out = String::new();

        out.push_str("=======================================\n");
        out.push_str(&format!("        {}\n", strings.title));
        out.push_str(&format!("        {}\n", strings.subtitle));
        out.push_str("=======================================\n\n");

        out.push_str(&format!(
            "{}: {}\n",
            strings.name_label,
            self.name.to_uppercase()
        ));
        out.push_str(&format!(
            "{}: {} / {}\n",
            strings.age_gender_label, self.age, self.gender
        ));
        out.push_str(&format!("{}: {}\n\n", strings.diet_label, self.diet));

        out.push_str(&format!("{}\n", strings.results_heading));
        out.push_str(&format!(
            "  {}: {:.1} g/dL\n",
            strings.hb_label, self.hb_value
        ));
        out.push_str(&format!("  {}\n\n", self.status));

        out.push_str(&format!(
            "{}: {}\n",
            strings.recommendation_heading, self.diet_plan
        ));
        out.push_str(&format!("{}: {}\n\n", strings.tip_heading, self.advice));

        out.push_str(&format!("{}\n", strings.reference_heading));
        for row in &self.reference_ranges {
            out.push_str(&format!(
                "  {}: {:.1}-{:.1} g/dL ({} {:.1})\n",
                row.group,
                row.low_g_dl,
                row.high_g_dl,
                strings.anemia_below_label,
                row.anemia_below_g_dl
            ));
        }

        out.push_str("\n---------------------------------------\n");
        out.push_str(&format!("{}\n", self.disclaimer));
        out
    }

    /// The JSON form of the document, for machine consumers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DietPreference, Gender, HbStatus, PatientProfile};

    fn sample_result() -> ScreeningResult {
        ScreeningResult {
            hb_value: 12.9,
            status: HbStatus::Normal,
            status_label: "Normal",
            diet_plan: "Diet: Spinach, Beetroot, Dates.",
            advice: "Take Vitamin C for absorption.",
        }
    }

    fn sample_patient() -> PatientProfile {
        PatientProfile {
            name: "Asha Verma".to_string(),
            age: 25,
            gender: Gender::Female,
            diet: DietPreference::Vegetarian,
        }
    }

    #[test]
    fn text_report_carries_identity_result_and_guidance() {
        let document =
            ReportDocument::assemble(&sample_patient(), &sample_result(), Language::English);
        let text = document.render_text();

        assert!(text.contains("ASHA VERMA"));
        assert!(text.contains("25 / Female"));
        assert!(text.contains("12.9 g/dL"));
        assert!(text.contains("Normal"));
        assert!(text.contains("Diet: Spinach, Beetroot, Dates."));
        assert!(text.contains("Take Vitamin C for absorption."));
    }

    #[test]
    fn reference_table_and_disclaimer_are_always_present() {
        let document =
            ReportDocument::assemble(&sample_patient(), &sample_result(), Language::English);
        let text = document.render_text();

        assert!(text.contains("Adult Male: 13.0-17.0 g/dL (anemia below 13.0)"));
        assert!(text.contains("Adult Female: 12.0-15.0 g/dL (anemia below 12.0)"));
        assert!(text.contains("NOT a clinical diagnosis"));
        assert!(text.contains("+/- 1 g/dL"));
        assert!(text.contains("CBC"));
    }

    #[test]
    fn hindi_report_keeps_the_semantic_blocks() {
        let document =
            ReportDocument::assemble(&sample_patient(), &sample_result(), Language::Hindi);
        let text = document.render_text();

        // Localized wording, same semantic content.
        assert!(text.contains("13.0-17.0 g/dL"));
        assert!(text.contains("12.0-15.0 g/dL"));
        assert!(text.contains("+/- 1 g/dL"));
        assert!(text.contains("CBC"));
    }

    #[test]
    fn json_form_exposes_the_flat_fields() {
        let document =
            ReportDocument::assemble(&sample_patient(), &sample_result(), Language::English);
        let json = document.to_json().unwrap();

        assert!(json.contains("\"hb_value\": 12.9"));
        assert!(json.contains("\"status\": \"Normal\""));
        assert!(json.contains("\"reference_ranges\""));
    }
}
