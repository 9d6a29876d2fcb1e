use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::StoreError;

/// What a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Brand,
    Substance,
}

/// One entry of the catalog search result, UI-facing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    /// Brand regulatory code or substance id; feeds straight back into
    /// `resolve_rules`.
    pub id: String,
    pub name: String,
}

/// Case-insensitive name search over brands and substances.
pub fn search_catalog(
    conn: &Connection,
    query: &str,
    limit: u32,
) -> Result<Vec<SearchHit>, StoreError> {
    let pattern = format!("%{query}%");
    let mut hits = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT code, name FROM brands
         WHERE LOWER(name) LIKE LOWER(?1) ORDER BY name LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![pattern, limit], |row| {
        Ok(SearchHit {
            kind: SearchKind::Brand,
            id: row.get::<_, String>(0)?,
            name: row.get(1)?,
        })
    })?;
    for row in rows {
        hits.push(row?);
    }

    let remaining = limit.saturating_sub(hits.len() as u32);
    if remaining > 0 {
        let mut stmt = conn.prepare(
            "SELECT id, name FROM substances
             WHERE LOWER(name) LIKE LOWER(?1) ORDER BY name LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, remaining], |row| {
            Ok(SearchHit {
                kind: SearchKind::Substance,
                id: row.get::<_, i64>(0)?.to_string(),
                name: row.get(1)?,
            })
        })?;
        for row in rows {
            hits.push(row?);
        }
    }

    Ok(hits)
}
