// src/db/properties.rs
use crate::db::connection::Database;
use crate::domain::property::Property;
use crate::errors::ServerError;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

/// Stores directory records, inserting new ones and overwriting known ids.
///
/// With `replace_all`, properties missing from `properties` are removed, so the
/// table mirrors the directory exactly. Runs in a single transaction.
pub fn save_properties(
    db: &Database,
    properties: &[Property],
    replace_all: bool,
) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let now = Utc::now().naive_utc();

        if replace_all {
            tx.execute("DELETE FROM properties", [])?;
        }

        for prop in properties {
            upsert_property(&tx, prop, now)?;
        }

        tx.commit()?;
        Ok(properties.len())
    })
}

fn upsert_property(tx: &Connection, prop: &Property, now: NaiveDateTime) -> Result<(), ServerError> {
    let record_json = serde_json::to_string(&prop.record)
        .map_err(|e| ServerError::DbError(format!("Failed to encode property {}: {e}", prop.id)))?;

    tx.execute(
        r#"
        INSERT INTO properties (id, name, address, city, record_json, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            address = excluded.address,
            city = excluded.city,
            record_json = excluded.record_json,
            updated_at = excluded.updated_at
        "#,
        params![
            &prop.id,
            &prop.name,
            &prop.address,
            &prop.city,
            record_json,
            now
        ],
    )?;
    Ok(())
}

/// Loads every stored property, in id order.
///
/// A row whose stored record no longer parses is skipped with a warning.
pub fn load_properties(conn: &Connection) -> Result<Vec<Property>, ServerError> {
    let mut stmt = conn.prepare("SELECT id, record_json FROM properties ORDER BY id")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut properties = Vec::new();
    for row in rows {
        let (id, record_json) = row?;
        let parsed = serde_json::from_str::<serde_json::Value>(&record_json)
            .map_err(|e| e.to_string())
            .and_then(Property::from_record);

        match parsed {
            Ok(p) => properties.push(p),
            Err(e) => tracing::warn!(property_id = %id, error = %e, "Stored property unreadable"),
        }
    }
    Ok(properties)
}
