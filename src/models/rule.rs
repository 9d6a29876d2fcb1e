use serde::{Deserialize, Serialize};

use super::enums::{Gender, RiskLevel};

/// Question code of rules that apply unconditionally: the substance or
/// family carries an absolute signal regardless of patient answers.
pub const GENERAL_QUESTION_CODE: &str = "GENERAL";

/// Codes that re-ask the "do you take other medications" fact already
/// collected at the profile level. Excluded from direct display; answered
/// automatically during evaluation.
pub const POLYMEDICATION_CODE_PREFIX: &str = "Q_POLYMEDICATION";

/// One unit of safety knowledge: a screening question (or the `GENERAL`
/// sentinel) linked to a risk level, advice text, a family or substance
/// target, and patient-applicability filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub question_code: String,
    pub risk_level: RiskLevel,
    pub advice: String,
    pub family_id: Option<i64>,
    pub substance_id: Option<i64>,
    /// Substring-matched against the brand's route, case-insensitive.
    pub filter_route: Option<String>,
    /// Rule only applies to patients taking other medications.
    pub filter_polymedication: bool,
    pub filter_gender: Option<Gender>,
    /// Minimum age bound. No maximum is modeled.
    pub age_min: Option<u32>,
}

impl Rule {
    /// Triggers without any patient answer.
    pub fn is_unconditional(&self) -> bool {
        self.question_code == GENERAL_QUESTION_CODE
    }

    /// Dedicated polymedication question code.
    pub fn is_polymedication_code(&self) -> bool {
        self.question_code.starts_with(POLYMEDICATION_CODE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(code: &str) -> Rule {
        Rule {
            id: 1,
            question_code: code.into(),
            risk_level: RiskLevel::Caution,
            advice: "advice".into(),
            family_id: Some(1),
            substance_id: None,
            filter_route: None,
            filter_polymedication: false,
            filter_gender: None,
            age_min: None,
        }
    }

    #[test]
    fn general_code_is_unconditional() {
        assert!(rule(GENERAL_QUESTION_CODE).is_unconditional());
        assert!(!rule("Q_LIVER").is_unconditional());
    }

    #[test]
    fn polymedication_prefix_detected() {
        assert!(rule("Q_POLYMEDICATION").is_polymedication_code());
        assert!(rule("Q_POLYMEDICATION_DAILY").is_polymedication_code());
        assert!(!rule("Q_LIVER").is_polymedication_code());
    }
}
