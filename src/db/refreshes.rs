use crate::errors::ServerError;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

/// What caused a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    JobUpdate,
    PropertyImport,
    DirectorySync,
}

impl RefreshTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshTrigger::Startup => "startup",
            RefreshTrigger::JobUpdate => "job_update",
            RefreshTrigger::PropertyImport => "property_import",
            RefreshTrigger::DirectorySync => "directory_sync",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MapRefresh {
    pub id: i64,
    pub trigger: String,
    pub started_at: NaiveDateTime,
    pub jobs_seen: i64,
    pub markers: i64,
    pub changed: bool,
    pub revision: i64,
}

pub fn record_refresh(
    conn: &Connection,
    trigger: RefreshTrigger,
    jobs_seen: usize,
    markers: usize,
    changed: bool,
    revision: u64,
) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO map_refreshes (trigger, started_at, jobs_seen, markers, changed, revision) VALUES (?, ?, ?, ?, ?, ?)",
        params![
            trigger.as_str(),
            Utc::now().naive_utc(),
            jobs_seen,
            markers,
            changed,
            revision as i64
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_recent_refreshes(conn: &Connection, limit: usize) -> Result<Vec<MapRefresh>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT id, trigger, started_at, jobs_seen, markers, changed, revision FROM map_refreshes ORDER BY id DESC LIMIT ?",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok(MapRefresh {
            id: row.get(0)?,
            trigger: row.get(1)?,
            started_at: row.get(2)?,
            jobs_seen: row.get(3)?,
            markers: row.get(4)?,
            changed: row.get(5)?,
            revision: row.get(6)?,
        })
    })?;

    let mut refreshes = Vec::new();
    for r in rows {
        refreshes.push(r?);
    }
    Ok(refreshes)
}
