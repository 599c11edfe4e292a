// src/db/jobs.rs
use crate::db::connection::Database;
use crate::domain::job::{Job, JobStatus};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Inserts or updates jobs by id within one transaction.
pub fn upsert_jobs(db: &Database, jobs: &[Job]) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let now = Utc::now().naive_utc();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO jobs (id, title, property_id, status, priority, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    property_id = excluded.property_id,
                    status = excluded.status,
                    priority = excluded.priority,
                    updated_at = excluded.updated_at
                "#,
            )?;

            for job in jobs {
                stmt.execute(params![
                    &job.id,
                    &job.title,
                    &job.property_id,
                    job.status.as_str(),
                    &job.priority,
                    now,
                ])?;
            }
        }

        tx.commit()?;
        Ok(jobs.len())
    })
}

fn job_from_row(row: &Row<'_>) -> rusqlite::Result<Job> {
    let status: String = row.get(3)?;
    Ok(Job {
        id: row.get(0)?,
        title: row.get(1)?,
        property_id: row.get(2)?,
        status: JobStatus::from(status),
        priority: row.get(4)?,
    })
}

/// Jobs that still belong on the map: everything not completed or cancelled,
/// in the order they were first recorded.
pub fn load_in_flight_jobs(conn: &Connection) -> Result<Vec<Job>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, title, property_id, status, priority
        FROM jobs
        ORDER BY rowid
        "#,
    )?;

    let rows = stmt.query_map([], job_from_row)?;

    let mut jobs = Vec::new();
    for r in rows {
        let job = r?;
        if !job.status.is_terminal() {
            jobs.push(job);
        }
    }
    Ok(jobs)
}

pub fn find_job(conn: &Connection, id: &str) -> Result<Option<Job>, ServerError> {
    conn.query_row(
        "SELECT id, title, property_id, status, priority FROM jobs WHERE id = ?1",
        params![id],
        job_from_row,
    )
    .optional()
    .map_err(ServerError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::init_test_db;

    fn job(id: &str, status: JobStatus) -> Job {
        Job {
            id: id.into(),
            title: Some("Pool service".into()),
            property_id: Some("p1".into()),
            status,
            priority: Some("normal".into()),
        }
    }

    #[test]
    fn terminal_jobs_leave_the_in_flight_list() {
        let db = init_test_db();
        upsert_jobs(
            &db,
            &[
                job("j1", JobStatus::Pending),
                job("j2", JobStatus::InProgress),
                job("j3", JobStatus::Other("on_hold".into())),
            ],
        )
        .unwrap();

        upsert_jobs(&db, &[job("j2", JobStatus::Completed)]).unwrap();

        let in_flight = db.with_conn(|conn| load_in_flight_jobs(conn)).unwrap();
        let ids: Vec<_> = in_flight.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["j1", "j3"]);
        assert_eq!(in_flight[1].status, JobStatus::Other("on_hold".into()));

        let j2 = db.with_conn(|conn| find_job(conn, "j2")).unwrap().unwrap();
        assert_eq!(j2.status, JobStatus::Completed);
        assert!(db.with_conn(|conn| find_job(conn, "nope")).unwrap().is_none());
    }
}
