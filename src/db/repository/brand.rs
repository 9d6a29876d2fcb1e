use rusqlite::{params, Connection, OptionalExtension};

use crate::db::StoreError;
use crate::models::{Brand, BrandSubstance, Substance};

/// Load a brand by its regulatory code, composition included.
/// `Ok(None)` when the code matches nothing.
pub fn get_brand_by_code(conn: &Connection, code: &str) -> Result<Option<Brand>, StoreError> {
    let head = conn
        .query_row(
            "SELECT id, code, name, route, is_otc FROM brands WHERE code = ?1",
            params![code],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )
        .optional()?;

    let Some((id, code, name, route, is_otc)) = head else {
        return Ok(None);
    };

    let composition = get_composition(conn, id)?;

    Ok(Some(Brand {
        id,
        code,
        name,
        route,
        is_otc: is_otc != 0,
        composition,
    }))
}

fn get_composition(conn: &Connection, brand_id: i64) -> Result<Vec<BrandSubstance>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.name, bs.dosage
         FROM brand_substances bs
         JOIN substances s ON s.id = bs.substance_id
         WHERE bs.brand_id = ?1
         ORDER BY s.name",
    )?;

    let rows = stmt.query_map(params![brand_id], |row| {
        Ok(BrandSubstance {
            substance: Substance {
                id: row.get(0)?,
                name: row.get(1)?,
            },
            dosage: row.get(2)?,
        })
    })?;

    rows.map(|r| r.map_err(StoreError::from)).collect()
}
