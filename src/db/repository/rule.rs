use std::str::FromStr;

use rusqlite::{params_from_iter, Connection};

use super::placeholders;
use crate::db::StoreError;
use crate::models::enums::{Gender, RiskLevel};
use crate::models::Rule;

/// Every rule targeting one of the given substances or one of the given
/// families. Ordered by id so downstream question flows are deterministic.
pub fn rules_for_targets(
    conn: &Connection,
    substance_ids: &[i64],
    family_ids: &[i64],
) -> Result<Vec<Rule>, StoreError> {
    let mut clauses = Vec::new();
    if !substance_ids.is_empty() {
        clauses.push(format!(
            "substance_id IN ({})",
            placeholders(substance_ids.len())
        ));
    }
    if !family_ids.is_empty() {
        clauses.push(format!("family_id IN ({})", placeholders(family_ids.len())));
    }
    if clauses.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT id, question_code, risk_level, advice, family_id, substance_id,
         filter_route, filter_polymedication, filter_gender, age_min
         FROM rules WHERE {} ORDER BY id",
        clauses.join(" OR ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let bound = substance_ids.iter().chain(family_ids.iter());
    let rows = stmt.query_map(params_from_iter(bound), |row| Ok(rule_row_from_rusqlite(row)))?;

    let mut rules = Vec::new();
    for row in rows {
        rules.push(rule_from_row(row??)?);
    }
    Ok(rules)
}

// Internal row type for Rule mapping
struct RuleRow {
    id: i64,
    question_code: String,
    risk_level: i64,
    advice: String,
    family_id: Option<i64>,
    substance_id: Option<i64>,
    filter_route: Option<String>,
    filter_polymedication: i64,
    filter_gender: Option<String>,
    age_min: Option<i64>,
}

fn rule_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<RuleRow, rusqlite::Error> {
    Ok(RuleRow {
        id: row.get(0)?,
        question_code: row.get(1)?,
        risk_level: row.get(2)?,
        advice: row.get(3)?,
        family_id: row.get(4)?,
        substance_id: row.get(5)?,
        filter_route: row.get(6)?,
        filter_polymedication: row.get(7)?,
        filter_gender: row.get(8)?,
        age_min: row.get(9)?,
    })
}

fn rule_from_row(row: RuleRow) -> Result<Rule, StoreError> {
    Ok(Rule {
        id: row.id,
        question_code: row.question_code,
        risk_level: RiskLevel::from_ordinal(row.risk_level)?,
        advice: row.advice,
        family_id: row.family_id,
        substance_id: row.substance_id,
        filter_route: row.filter_route,
        filter_polymedication: row.filter_polymedication != 0,
        filter_gender: row.filter_gender.as_deref().map(Gender::from_str).transpose()?,
        age_min: row.age_min.map(|a| a as u32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::testing::*;
    use crate::models::rule::GENERAL_QUESTION_CODE;

    #[test]
    fn rules_selected_by_substance_or_family() {
        let conn = open_memory_database().unwrap();
        let nsaid = insert_family(&conn, "NSAID");
        let ibu = insert_substance(&conn, "IBUPROFÈNE");
        let para = insert_substance(&conn, "PARACÉTAMOL");
        link_family(&conn, ibu, nsaid);

        insert_rule(
            &conn,
            &RuleFixture {
                question_code: "Q_ULCER",
                risk_level: RiskLevel::Contraindicated,
                family_id: Some(nsaid),
                ..Default::default()
            },
        );
        insert_rule(
            &conn,
            &RuleFixture {
                question_code: "Q_LIVER",
                risk_level: RiskLevel::Avoid,
                substance_id: Some(para),
                ..Default::default()
            },
        );
        // Unrelated target, must not be selected
        let other = insert_family(&conn, "anticoagulant");
        insert_rule(
            &conn,
            &RuleFixture {
                question_code: GENERAL_QUESTION_CODE,
                family_id: Some(other),
                ..Default::default()
            },
        );

        let rules = rules_for_targets(&conn, &[ibu, para], &[nsaid]).unwrap();
        let codes: Vec<&str> = rules.iter().map(|r| r.question_code.as_str()).collect();
        assert_eq!(codes, vec!["Q_ULCER", "Q_LIVER"]);
    }

    #[test]
    fn no_targets_yields_empty_set() {
        let conn = open_memory_database().unwrap();
        assert!(rules_for_targets(&conn, &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn filter_columns_decoded() {
        let conn = open_memory_database().unwrap();
        let nsaid = insert_family(&conn, "NSAID");
        insert_rule(
            &conn,
            &RuleFixture {
                question_code: "Q_PREGNANCY",
                risk_level: RiskLevel::Contraindicated,
                family_id: Some(nsaid),
                filter_route: Some("orale"),
                filter_gender: Some(Gender::Female),
                age_min: Some(15),
                filter_polymedication: true,
                ..Default::default()
            },
        );

        let rules = rules_for_targets(&conn, &[], &[nsaid]).unwrap();
        assert_eq!(rules.len(), 1);
        let rule = &rules[0];
        assert_eq!(rule.filter_route.as_deref(), Some("orale"));
        assert_eq!(rule.filter_gender, Some(Gender::Female));
        assert_eq!(rule.age_min, Some(15));
        assert!(rule.filter_polymedication);
    }

    #[test]
    fn corrupt_risk_level_is_a_store_error() {
        let conn = open_memory_database().unwrap();
        let nsaid = insert_family(&conn, "NSAID");
        conn.execute(
            "INSERT INTO rules (question_code, risk_level, advice, family_id) VALUES ('Q_X', 9, 'x', ?1)",
            rusqlite::params![nsaid],
        )
        .unwrap();

        let result = rules_for_targets(&conn, &[], &[nsaid]);
        assert!(matches!(result, Err(StoreError::InvalidEnum { .. })));
    }
}
