use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::placeholders;
use crate::db::StoreError;
use crate::models::Substance;

/// Look up a bare substance. A numeric identifier is treated as the
/// substance id, anything else as an exact (case-insensitive) name.
pub fn get_substance(conn: &Connection, identifier: &str) -> Result<Option<Substance>, StoreError> {
    if let Ok(id) = identifier.parse::<i64>() {
        let found = conn
            .query_row(
                "SELECT id, name FROM substances WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Substance {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        return Ok(found);
    }

    let found = conn
        .query_row(
            "SELECT id, name FROM substances WHERE LOWER(name) = LOWER(?1)",
            params![identifier],
            |row| {
                Ok(Substance {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(found)
}

/// Family ids of every listed substance, deduplicated (batch set-membership
/// lookup; values bound, never spliced).
pub fn families_for_substances(
    conn: &Connection,
    substance_ids: &[i64],
) -> Result<Vec<i64>, StoreError> {
    if substance_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT DISTINCT family_id FROM substance_families WHERE substance_id IN ({})",
        placeholders(substance_ids.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(substance_ids.iter()), |row| {
        row.get::<_, i64>(0)
    })?;

    rows.map(|r| r.map_err(StoreError::from)).collect()
}
