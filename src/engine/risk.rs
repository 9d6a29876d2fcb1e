//! Risk aggregation: reduce a rule set plus patient answers to one ordered
//! risk level with the full supporting evidence.

use crate::models::enums::RiskLevel;
use crate::models::{PatientContext, Rule};

use super::types::{TriggerRecord, Verdict};

/// Force a "yes" answer onto every rule that encodes the polymedication
/// fact, when the patient declared taking other medications at the profile
/// level. Keeps that question from being asked twice while still letting it
/// contribute to the score.
pub fn inject_polymedication_answers(rules: &[Rule], context: &mut PatientContext) {
    if !context.has_other_meds {
        return;
    }
    for rule in rules {
        if rule.filter_polymedication || rule.is_polymedication_code() {
            context.answers.insert(rule.question_code.clone(), true);
        }
    }
}

/// Aggregate every triggered rule into a verdict.
///
/// A rule triggers when its code is the unconditional sentinel or the
/// patient answered "yes" to it; unanswered codes count as "no". The level
/// is the maximum across all triggered rules. Every rule is evaluated,
/// no short-circuit on the first contraindication, so the advice list and
/// trigger log carry the complete evidence set.
pub fn compute_score(rules: &[Rule], context: &PatientContext) -> Verdict {
    let mut level = RiskLevel::Safe;
    let mut advice: Vec<String> = Vec::new();
    let mut triggers: Vec<TriggerRecord> = Vec::new();

    for rule in rules {
        let triggered = rule.is_unconditional() || context.answer(&rule.question_code);
        if !triggered {
            continue;
        }

        triggers.push(TriggerRecord::yes(&rule.question_code, rule.risk_level));
        if !advice.contains(&rule.advice) {
            advice.push(rule.advice.clone());
        }
        level = level.max(rule.risk_level);
    }

    Verdict {
        level,
        advice,
        triggers,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::rule::GENERAL_QUESTION_CODE;

    fn rule(code: &str, level: RiskLevel) -> Rule {
        Rule {
            id: 0,
            question_code: code.into(),
            risk_level: level,
            advice: format!("advice for {code}"),
            family_id: Some(1),
            substance_id: None,
            filter_route: None,
            filter_polymedication: false,
            filter_gender: None,
            age_min: None,
        }
    }

    fn yes(codes: &[&str]) -> PatientContext {
        let answers: HashMap<String, bool> =
            codes.iter().map(|c| (c.to_string(), true)).collect();
        PatientContext {
            answers,
            ..Default::default()
        }
    }

    #[test]
    fn score_is_maximum_over_triggered_rules() {
        let rules = vec![
            rule("Q_LIVER", RiskLevel::Avoid),
            rule("Q_ALLERGY", RiskLevel::Contraindicated),
            rule("Q_ALCOHOL", RiskLevel::Caution),
        ];
        let verdict = compute_score(&rules, &yes(&["Q_LIVER", "Q_ALLERGY", "Q_ALCOHOL"]));
        assert_eq!(verdict.level, RiskLevel::Contraindicated);
        assert_eq!(verdict.triggers.len(), 3);
    }

    #[test]
    fn no_trigger_yields_lowest_level() {
        let rules = vec![rule("Q_LIVER", RiskLevel::Avoid)];
        let verdict = compute_score(&rules, &PatientContext::default());
        assert_eq!(verdict.level, RiskLevel::Safe);
        assert!(verdict.advice.is_empty());
        assert!(verdict.triggers.is_empty());
    }

    #[test]
    fn no_answer_never_contributes_risk() {
        let rules = vec![
            rule("Q_LIVER", RiskLevel::Contraindicated),
            rule("Q_ULCER", RiskLevel::Avoid),
        ];
        let mut context = yes(&["Q_ULCER"]);
        context.answers.insert("Q_LIVER".to_string(), false);
        let verdict = compute_score(&rules, &context);
        assert_eq!(verdict.level, RiskLevel::Avoid);
        assert_eq!(verdict.triggers.len(), 1);
        assert_eq!(verdict.triggers[0].question_code, "Q_ULCER");
    }

    #[test]
    fn unknown_answer_codes_are_ignored() {
        let rules = vec![rule("Q_LIVER", RiskLevel::Avoid)];
        let verdict = compute_score(&rules, &yes(&["Q_NOT_IN_RULESET"]));
        assert_eq!(verdict.level, RiskLevel::Safe);
    }

    #[test]
    fn general_rule_triggers_without_answers() {
        let rules = vec![
            rule(GENERAL_QUESTION_CODE, RiskLevel::Contraindicated),
            rule("Q_LIVER", RiskLevel::Avoid),
        ];
        let verdict = compute_score(&rules, &PatientContext::default());
        assert_eq!(verdict.level, RiskLevel::Contraindicated);
        assert_eq!(verdict.triggers.len(), 1);
        assert_eq!(verdict.triggers[0].question_code, GENERAL_QUESTION_CODE);
    }

    #[test]
    fn no_short_circuit_all_advice_collected() {
        // The contraindicated rule comes first; later rules must still be
        // evaluated and their advice kept.
        let rules = vec![
            rule("Q_ALLERGY", RiskLevel::Contraindicated),
            rule("Q_LIVER", RiskLevel::Avoid),
        ];
        let verdict = compute_score(&rules, &yes(&["Q_ALLERGY", "Q_LIVER"]));
        assert_eq!(verdict.level, RiskLevel::Contraindicated);
        assert_eq!(
            verdict.advice,
            vec!["advice for Q_ALLERGY", "advice for Q_LIVER"]
        );
        assert_eq!(verdict.triggers.len(), 2);
    }

    #[test]
    fn duplicate_advice_kept_once_first_seen_order() {
        let mut a = rule("Q_A", RiskLevel::Caution);
        let mut b = rule("Q_B", RiskLevel::Avoid);
        a.advice = "shared advice".into();
        b.advice = "shared advice".into();
        let rules = vec![a, b, rule("Q_C", RiskLevel::Caution)];

        let verdict = compute_score(&rules, &yes(&["Q_A", "Q_B", "Q_C"]));
        assert_eq!(verdict.advice, vec!["shared advice", "advice for Q_C"]);
        // Both triggers are still recorded
        assert_eq!(verdict.triggers.len(), 3);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let rules = vec![
            rule("Q_A", RiskLevel::Caution),
            rule("Q_B", RiskLevel::Avoid),
        ];
        let context = yes(&["Q_A", "Q_B"]);
        let first = compute_score(&rules, &context);
        let second = compute_score(&rules, &context);
        assert_eq!(first.level, second.level);
        assert_eq!(first.advice, second.advice);
    }

    #[test]
    fn adding_a_triggered_rule_never_lowers_the_score() {
        let base = vec![rule("Q_A", RiskLevel::Avoid)];
        let context = yes(&["Q_A", "Q_B"]);
        let before = compute_score(&base, &context).level;

        let mut extended = base;
        extended.push(rule("Q_B", RiskLevel::Caution));
        let after = compute_score(&extended, &context).level;
        assert!(after >= before);
    }

    #[test]
    fn polymedication_injection_forces_flagged_rules() {
        let mut flagged = rule("Q_INTERACTION", RiskLevel::Avoid);
        flagged.filter_polymedication = true;
        let sentinel = rule("Q_POLYMEDICATION", RiskLevel::Caution);
        let rules = vec![flagged, sentinel, rule("Q_LIVER", RiskLevel::Avoid)];

        let mut context = PatientContext {
            has_other_meds: true,
            ..Default::default()
        };
        inject_polymedication_answers(&rules, &mut context);
        assert!(context.answer("Q_INTERACTION"));
        assert!(context.answer("Q_POLYMEDICATION"));
        assert!(!context.answer("Q_LIVER"));

        let verdict = compute_score(&rules, &context);
        assert_eq!(verdict.level, RiskLevel::Avoid);
    }

    #[test]
    fn no_injection_without_other_meds() {
        let mut flagged = rule("Q_INTERACTION", RiskLevel::Avoid);
        flagged.filter_polymedication = true;
        let rules = vec![flagged];

        let mut context = PatientContext::default();
        inject_polymedication_answers(&rules, &mut context);
        assert!(context.answers.is_empty());
    }
}
