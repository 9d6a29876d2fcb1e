use std::path::PathBuf;

use rusqlite::Connection;

use super::{
    families_for_substances, get_brand_by_code, get_substance, rules_for_targets, search_catalog,
    SearchHit,
};
use crate::db::{open_database, StoreError};
use crate::models::{Brand, Rule};

/// Read-only access to the rule store. Resolves a drug or substance
/// identifier to its applicable rule set by following substance → family
/// membership. Connections are scoped per call and released on every exit
/// path; the store is never mutated here.
pub struct RuleRepository {
    db_path: PathBuf,
}

impl RuleRepository {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        open_database(&self.db_path)
    }

    /// Every rule that applies to the identifier. For a brand: rules whose
    /// substance is in the composition or whose family is a family of one
    /// of those substances. For a bare substance: that substance plus its
    /// families. An identifier matching nothing yields an empty set, a
    /// valid "no known risk signal" outcome, not an error.
    pub fn resolve_rules(&self, identifier: &str) -> Result<Vec<Rule>, StoreError> {
        let conn = self.connect()?;
        let rules = resolve_rules_with(&conn, identifier)?;
        tracing::debug!(identifier, rules = rules.len(), "Resolved rule set");
        Ok(rules)
    }

    /// Administration route of a brand, `None` for bare substances
    /// (routes are a brand-level attribute only).
    pub fn resolve_route(&self, identifier: &str) -> Result<Option<String>, StoreError> {
        let conn = self.connect()?;
        Ok(get_brand_by_code(&conn, identifier)?.and_then(|b| b.route))
    }

    /// Full brand record for response enrichment (name, OTC flag,
    /// composition). `None` when the identifier is not a brand code.
    pub fn brand_details(&self, identifier: &str) -> Result<Option<Brand>, StoreError> {
        let conn = self.connect()?;
        get_brand_by_code(&conn, identifier)
    }

    /// Catalog name search, for identifier pickers.
    pub fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, StoreError> {
        let conn = self.connect()?;
        search_catalog(&conn, query, limit)
    }
}

/// Resolution against an already-open connection.
pub fn resolve_rules_with(conn: &Connection, identifier: &str) -> Result<Vec<Rule>, StoreError> {
    if let Some(brand) = get_brand_by_code(conn, identifier)? {
        let substance_ids = brand.substance_ids();
        let family_ids = families_for_substances(conn, &substance_ids)?;
        return rules_for_targets(conn, &substance_ids, &family_ids);
    }

    if let Some(substance) = get_substance(conn, identifier)? {
        let family_ids = families_for_substances(conn, &[substance.id])?;
        return rules_for_targets(conn, &[substance.id], &family_ids);
    }

    Ok(Vec::new())
}
