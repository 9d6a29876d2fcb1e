//! Patient-context filters over a rule set.
//!
//! Pure set intersections, independent of each other: applying them in any
//! order gives the same result. Every filter keeps a rule when the relevant
//! patient attribute is unknown, since withholding a safety question is worse
//! than asking one unnecessarily.

use crate::models::enums::Gender;
use crate::models::Rule;

/// Keep rules with no route filter, or whose filter value is a
/// case-insensitive substring of the query route. A query without a route
/// (bare-substance lookup) disables the filter entirely.
pub fn by_route(mut rules: Vec<Rule>, route: Option<&str>) -> Vec<Rule> {
    let Some(route) = route else {
        return rules;
    };
    let route = route.to_lowercase();
    rules.retain(|rule| match &rule.filter_route {
        None => true,
        Some(filter) => route.contains(&filter.to_lowercase()),
    });
    rules
}

/// Keep rules with no gender filter, or an exact match.
pub fn by_gender(mut rules: Vec<Rule>, gender: Option<Gender>) -> Vec<Rule> {
    let Some(gender) = gender else {
        return rules;
    };
    rules.retain(|rule| rule.filter_gender.is_none() || rule.filter_gender == Some(gender));
    rules
}

/// Keep rules with no minimum age, or whose minimum age is reached.
/// Only a lower bound is modeled.
pub fn by_age(mut rules: Vec<Rule>, age: Option<u32>) -> Vec<Rule> {
    let Some(age) = age else {
        return rules;
    };
    rules.retain(|rule| match rule.age_min {
        None => true,
        Some(min) => min <= age,
    });
    rules
}

/// Display-oriented polymedication filter: drops rules that require other
/// medications the patient does not take, and the dedicated polymedication
/// question codes (that fact is already collected at the profile level).
pub fn by_polymedication(mut rules: Vec<Rule>, has_other_meds: bool) -> Vec<Rule> {
    rules.retain(|rule| {
        !rule.is_polymedication_code() && (has_other_meds || !rule.filter_polymedication)
    });
    rules
}

/// All four filters, for a patient-facing question list.
pub fn for_display(
    rules: Vec<Rule>,
    route: Option<&str>,
    gender: Option<Gender>,
    age: Option<u32>,
    has_other_meds: bool,
) -> Vec<Rule> {
    let rules = by_route(rules, route);
    let rules = by_gender(rules, gender);
    let rules = by_age(rules, age);
    by_polymedication(rules, has_other_meds)
}

/// Scoring variant: same route/gender/age narrowing, but the dedicated
/// polymedication codes stay in so automatic answer injection can still
/// trigger them.
pub fn for_scoring(
    rules: Vec<Rule>,
    route: Option<&str>,
    gender: Option<Gender>,
    age: Option<u32>,
    has_other_meds: bool,
) -> Vec<Rule> {
    let rules = by_route(rules, route);
    let rules = by_gender(rules, gender);
    let mut rules = by_age(rules, age);
    rules.retain(|rule| has_other_meds || !rule.filter_polymedication);
    rules
}
