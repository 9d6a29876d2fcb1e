//! Shared fixtures for database-backed tests.

use rusqlite::{params, Connection};

use crate::models::enums::{Gender, RiskLevel};

pub(crate) fn insert_family(conn: &Connection, name: &str) -> i64 {
    conn.execute("INSERT INTO families (name) VALUES (?1)", params![name])
        .unwrap();
    conn.last_insert_rowid()
}

pub(crate) fn insert_substance(conn: &Connection, name: &str) -> i64 {
    conn.execute("INSERT INTO substances (name) VALUES (?1)", params![name])
        .unwrap();
    conn.last_insert_rowid()
}

pub(crate) fn link_family(conn: &Connection, substance_id: i64, family_id: i64) {
    conn.execute(
        "INSERT INTO substance_families (substance_id, family_id) VALUES (?1, ?2)",
        params![substance_id, family_id],
    )
    .unwrap();
}

pub(crate) fn insert_brand(
    conn: &Connection,
    code: &str,
    name: &str,
    route: Option<&str>,
    is_otc: bool,
) -> i64 {
    conn.execute(
        "INSERT INTO brands (code, name, route, is_otc) VALUES (?1, ?2, ?3, ?4)",
        params![code, name, route, is_otc as i64],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub(crate) fn add_composition(
    conn: &Connection,
    brand_id: i64,
    substance_id: i64,
    dosage: Option<&str>,
) {
    conn.execute(
        "INSERT INTO brand_substances (brand_id, substance_id, dosage) VALUES (?1, ?2, ?3)",
        params![brand_id, substance_id, dosage],
    )
    .unwrap();
}

pub(crate) struct RuleFixture {
    pub question_code: &'static str,
    pub risk_level: RiskLevel,
    pub advice: &'static str,
    pub family_id: Option<i64>,
    pub substance_id: Option<i64>,
    pub filter_route: Option<&'static str>,
    pub filter_polymedication: bool,
    pub filter_gender: Option<Gender>,
    pub age_min: Option<u32>,
}

impl Default for RuleFixture {
    fn default() -> Self {
        Self {
            question_code: "Q_QUESTION",
            risk_level: RiskLevel::Caution,
            advice: "Ask your pharmacist for advice.",
            family_id: None,
            substance_id: None,
            filter_route: None,
            filter_polymedication: false,
            filter_gender: None,
            age_min: None,
        }
    }
}

pub(crate) fn insert_rule(conn: &Connection, fixture: &RuleFixture) -> i64 {
    conn.execute(
        "INSERT INTO rules (question_code, risk_level, advice, family_id, substance_id,
         filter_route, filter_polymedication, filter_gender, age_min)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            fixture.question_code,
            fixture.risk_level.ordinal(),
            fixture.advice,
            fixture.family_id,
            fixture.substance_id,
            fixture.filter_route,
            fixture.filter_polymedication as i64,
            fixture.filter_gender.map(|g| g.as_str()),
            fixture.age_min,
        ],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub(crate) struct SeedContext {
    pub ibuprofen_id: i64,
}

/// Small NSAID catalog: one OTC oral brand composed of ibuprofen (NSAID
/// family) + caffeine, two family-targeted rules and one
/// substance-targeted rule.
pub(crate) fn seed_nsaid_catalog(conn: &Connection) -> SeedContext {
    let nsaid_id = insert_family(conn, "NSAID");
    let ibuprofen_id = insert_substance(conn, "IBUPROFÈNE");
    let caffeine_id = insert_substance(conn, "CAFÉINE");
    link_family(conn, ibuprofen_id, nsaid_id);

    let brand_id = insert_brand(conn, "61234567", "NUROFEN 200 mg", Some("orale"), true);
    add_composition(conn, brand_id, ibuprofen_id, Some("200 mg"));
    add_composition(conn, brand_id, caffeine_id, None);

    insert_rule(
        conn,
        &RuleFixture {
            question_code: "Q_ULCER",
            risk_level: RiskLevel::Contraindicated,
            advice: "NSAIDs can reactivate a stomach ulcer.",
            family_id: Some(nsaid_id),
            ..Default::default()
        },
    );
    insert_rule(
        conn,
        &RuleFixture {
            question_code: "Q_PREGNANCY",
            risk_level: RiskLevel::Contraindicated,
            advice: "NSAIDs are contraindicated from the 6th month of pregnancy.",
            family_id: Some(nsaid_id),
            filter_gender: Some(Gender::Female),
            ..Default::default()
        },
    );
    insert_rule(
        conn,
        &RuleFixture {
            question_code: "Q_KIDNEY",
            risk_level: RiskLevel::Avoid,
            advice: "Ibuprofen is eliminated by the kidneys.",
            substance_id: Some(ibuprofen_id),
            ..Default::default()
        },
    );

    SeedContext { ibuprofen_id }
}
