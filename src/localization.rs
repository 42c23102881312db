// THEORY:
// The `localization` module holds every user-facing string the engine can
// emit, in both supported languages. It is pure data: a fixed mapping from
// (language, category) to text, resolved by exhaustive match into `'static`
// tables. Nothing here is computed per call and nothing here affects the
// numeric pipeline; language selects words, never math.

use crate::core_modules::diet_classifier::{DietPreference, HbStatus};

/// The display language for statuses, guidance, and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
        }
    }
}

/// The clinical status label shown to the user.
pub fn status_label(status: HbStatus, language: Language) -> &'static str {
    match (language, status) {
        (Language::English, HbStatus::Normal) => "Normal",
        (Language::English, HbStatus::AnemiaDetected) => "Anemia Detected",
        (Language::Hindi, HbStatus::Normal) => "Swasth (Normal)",
        (Language::Hindi, HbStatus::AnemiaDetected) => "Khoon ki kami (Anemia)",
    }
}

/// The dietary plan, keyed by diet preference and language.
pub fn diet_plan(diet: DietPreference, language: Language) -> &'static str {
    match (language, diet) {
        (Language::English, DietPreference::Vegetarian) => "Diet: Spinach, Beetroot, Dates.",
        (Language::English, DietPreference::NonVegetarian) => "Diet: Red Meat & Eggs.",
        (Language::Hindi, DietPreference::Vegetarian) => {
            "आहार: पालक, चुकंदर, गुड़ और खजूर।"
        }
        (Language::Hindi, DietPreference::NonVegetarian) => {
            "आहार: रेड मीट, कलेजी और अंडा।"
        }
    }
}

/// The absorption tip. Varies by language only, never by diet.
pub fn advice(language: Language) -> &'static str {
    match language {
        Language::English => "Take Vitamin C for absorption.",
        Language::Hindi => "खाने के साथ विटामिन सी (नींबू) जरूर लें।",
    }
}

/// The fixed wording blocks of a rendered report.
#[derive(Debug)]
pub struct ReportStrings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub name_label: &'static str,
    pub age_gender_label: &'static str,
    pub diet_label: &'static str,
    pub results_heading: &'static str,
    pub hb_label: &'static str,
    pub recommendation_heading: &'static str,
    pub tip_heading: &'static str,
    pub reference_heading: &'static str,
    pub male_range_label: &'static str,
    pub female_range_label: &'static str,
    pub anemia_below_label: &'static str,
    pub disclaimer: &'static str,
}

static REPORT_STRINGS_EN: ReportStrings = ReportStrings {
    title: "HEMOLENS - REPORT",
    subtitle: "Anemia Screening Tool",
    name_label: "NAME",
    age_gender_label: "AGE / GENDER",
    diet_label: "DIET",
    results_heading: "SCREENING RESULTS",
    hb_label: "Hb Level",
    recommendation_heading: "Recommendation",
    tip_heading: "Tip",
    reference_heading: "Normal Range",
    male_range_label: "Adult Male",
    female_range_label: "Adult Female",
    anemia_below_label: "anemia below",
    disclaimer: "This is an AI Screening Tool, NOT a clinical diagnosis. Results can be +/- 1 g/dL. Please consult a doctor for a laboratory CBC Blood Test.",
};

static REPORT_STRINGS_HI: ReportStrings = ReportStrings {
    title: "HEMOLENS - रिपोर्ट",
    subtitle: "खून की कमी की जांच",
    name_label: "मरीज का नाम",
    age_gender_label: "उम्र / लिंग",
    diet_label: "खान-पान",
    results_heading: "जांच के परिणाम",
    hb_label: "Hb स्तर",
    recommendation_heading: "आहार सलाह",
    tip_heading: "सुझाव",
    reference_heading: "सामान्य रेंज",
    male_range_label: "पुरुष (Adult Male)",
    female_range_label: "महिला (Adult Female)",
    anemia_below_label: "खून की कमी इससे नीचे",
    disclaimer: "यह एक AI स्क्रीनिंग टूल है, क्लिनिकल निदान नहीं। परिणाम +/- 1 g/dL तक भिन्न हो सकते हैं। कृपया लैब CBC रक्त जांच के लिए डॉक्टर से सलाह लें।",
};

/// Report wording for the requested language.
pub fn report_strings(language: Language) -> &'static ReportStrings {
    match language {
        Language::English => &REPORT_STRINGS_EN,
        Language::Hindi => &REPORT_STRINGS_HI,
    }
}
