//! Question flow assembly: the ordered list a client walks the patient
//! through, profile questions first, then medical questions. Runs before
//! any answer exists, so patient-dependent narrowing is expressed as
//! client-side `show_if` conditions instead of being dropped server-side.

use serde::Serialize;

use crate::i18n::TranslationCatalog;
use crate::models::enums::{Gender, RiskLevel};
use crate::models::Rule;

use super::filters;

pub const GENDER_QUESTION_ID: &str = "GENDER";
pub const AGE_QUESTION_ID: &str = "AGE";
pub const OTHER_MEDS_QUESTION_ID: &str = "HAS_OTHER_MEDS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Choice,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowOption {
    pub value: String,
    pub label: String,
}

/// Client-side display condition. The client re-evaluates these locally
/// when the patient corrects an earlier answer, without a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShowIf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_other_meds: Option<bool>,
}

impl ShowIf {
    fn is_empty(&self) -> bool {
        self.gender.is_none() && self.age_min.is_none() && self.has_other_meds.is_none()
    }
}

/// One step of the client question flow.
#[derive(Debug, Clone, Serialize)]
pub struct FlowQuestion {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FlowOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIf>,
    pub is_profile: bool,
}

/// Assemble the full flow for a resolved rule set.
///
/// Empty result means no interview is needed: either nothing is known
/// about the identifier, or an unconditional rule at the highest level
/// already decides the outcome.
pub fn build_flow(
    rules: &[Rule],
    route: Option<&str>,
    catalog: &TranslationCatalog,
    lang: &str,
) -> Vec<FlowQuestion> {
    if rules.is_empty() {
        return Vec::new();
    }

    let routed = filters::by_route(rules.to_vec(), route);
    if routed
        .iter()
        .any(|r| r.is_unconditional() && r.risk_level == RiskLevel::Contraindicated)
    {
        // Absolute contraindication regardless of answers
        return Vec::new();
    }

    let mut flow = profile_questions(rules, catalog, lang);
    flow.extend(medical_questions(&routed, catalog, lang));
    flow
}

/// Profile questions are only asked when some rule depends on them, except
/// the other-medications boolean, which always matters for scoring.
fn profile_questions(
    rules: &[Rule],
    catalog: &TranslationCatalog,
    lang: &str,
) -> Vec<FlowQuestion> {
    let mut profile = Vec::new();

    if rules.iter().any(|r| r.filter_gender.is_some()) {
        profile.push(FlowQuestion {
            id: GENDER_QUESTION_ID.to_string(),
            text: catalog.profile_text(GENDER_QUESTION_ID, lang),
            kind: QuestionKind::Choice,
            options: Some(vec![
                FlowOption {
                    value: Gender::Male.as_str().to_string(),
                    label: catalog.option_label("GENDER_M", lang),
                },
                FlowOption {
                    value: Gender::Female.as_str().to_string(),
                    label: catalog.option_label("GENDER_F", lang),
                },
            ]),
            risk_level: None,
            show_if: None,
            is_profile: true,
        });
    }

    if rules.iter().any(|r| r.age_min.is_some()) {
        profile.push(FlowQuestion {
            id: AGE_QUESTION_ID.to_string(),
            text: catalog.profile_text(AGE_QUESTION_ID, lang),
            kind: QuestionKind::Number,
            options: None,
            risk_level: None,
            show_if: None,
            is_profile: true,
        });
    }

    profile.push(FlowQuestion {
        id: OTHER_MEDS_QUESTION_ID.to_string(),
        text: catalog.profile_text(OTHER_MEDS_QUESTION_ID, lang),
        kind: QuestionKind::Boolean,
        options: None,
        risk_level: None,
        show_if: None,
        is_profile: true,
    });

    profile
}

/// One question per distinct code, route-filtered only. Gender, age and
/// polymedication narrowing stay client-side via `show_if`.
fn medical_questions(
    routed: &[Rule],
    catalog: &TranslationCatalog,
    lang: &str,
) -> Vec<FlowQuestion> {
    let mut order: Vec<&str> = Vec::new();
    for rule in routed {
        if rule.is_unconditional() || rule.is_polymedication_code() {
            continue;
        }
        if !order.contains(&rule.question_code.as_str()) {
            order.push(&rule.question_code);
        }
    }

    order
        .into_iter()
        .map(|code| {
            let group: Vec<&Rule> = routed
                .iter()
                .filter(|r| r.question_code == code)
                .collect();
            let level = group
                .iter()
                .map(|r| r.risk_level)
                .fold(RiskLevel::Safe, RiskLevel::max);
            let show_if = merge_show_if(&group);

            FlowQuestion {
                id: code.to_string(),
                text: catalog.question_text(code, lang),
                kind: QuestionKind::Boolean,
                options: None,
                risk_level: Some(level),
                show_if: (!show_if.is_empty()).then_some(show_if),
                is_profile: false,
            }
        })
        .collect()
}

/// A display gate is emitted only when every rule behind the code agrees on
/// it; any disagreement falls back to "always show".
fn merge_show_if(group: &[&Rule]) -> ShowIf {
    let mut show_if = ShowIf::default();

    if let Some(first) = group.first().and_then(|r| r.filter_gender) {
        if group.iter().all(|r| r.filter_gender == Some(first)) {
            show_if.gender = Some(first);
        }
    }

    if group.iter().all(|r| r.age_min.is_some()) {
        show_if.age_min = group.iter().filter_map(|r| r.age_min).min();
    }

    if group.iter().all(|r| r.filter_polymedication) {
        show_if.has_other_meds = Some(true);
    }

    show_if
}
