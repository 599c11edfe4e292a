// app.rs
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::refreshes::{record_refresh, RefreshTrigger};
use crate::db::{jobs, properties};
use crate::directory::DirectoryClient;
use crate::domain::{Job, MapState, Property};
use crate::errors::ServerError;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Shared server state handed to every request.
///
/// The map state lives behind one mutex: a reconciliation pass holds it from
/// reading the job table until the next state is stored, so passes never
/// interleave and the latest pass wins.
pub struct App {
    pub db: Database,
    directory: Option<DirectoryClient>,
    map: Mutex<MapState>,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub revision: u64,
    pub changed: bool,
    pub markers: usize,
    pub jobs_seen: usize,
}

impl App {
    /// Builds the app and runs the first reconciliation from what is stored.
    pub fn new(config: &AppConfig, db: Database) -> Result<Self, ServerError> {
        let directory = match &config.directory_url {
            Some(url) => Some(DirectoryClient::new(url.clone(), config.directory_timeout)?),
            None => None,
        };

        let app = App {
            db,
            map: Mutex::new(MapState::new(Vec::new(), config.bounds)),
            directory,
        };
        app.reload_properties(RefreshTrigger::Startup)?;
        Ok(app)
    }

    /// A cheap copy of the current map state.
    pub fn snapshot(&self) -> Result<MapState, ServerError> {
        Ok(self.lock_map()?.clone())
    }

    /// Stores job updates and folds the in-flight set into the map.
    pub fn apply_job_updates(&self, updates: &[Job]) -> Result<RefreshOutcome, ServerError> {
        jobs::upsert_jobs(&self.db, updates)?;
        self.refresh_jobs(RefreshTrigger::JobUpdate)
    }

    /// Re-reads in-flight jobs and reconciles markers against them.
    pub fn refresh_jobs(&self, trigger: RefreshTrigger) -> Result<RefreshOutcome, ServerError> {
        let mut map = self.lock_map()?;
        let in_flight = self.db.with_conn(|conn| jobs::load_in_flight_jobs(conn))?;
        let next = map.apply_jobs(&in_flight);
        self.commit(&mut map, next, trigger, in_flight.len())
    }

    /// Stores imported property records, then rebuilds the markers.
    pub fn import_properties(
        &self,
        imported: &[Property],
        replace_all: bool,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, ServerError> {
        properties::save_properties(&self.db, imported, replace_all)?;
        self.reload_properties(trigger)
    }

    /// Pulls the full list from the property directory and mirrors it locally.
    pub fn sync_directory(&self) -> Result<RefreshOutcome, ServerError> {
        let directory = self.directory.as_ref().ok_or_else(|| {
            ServerError::BadRequest("No property directory configured".to_string())
        })?;
        let fetched = directory.fetch_properties()?;
        self.import_properties(&fetched, true, RefreshTrigger::DirectorySync)
    }

    fn reload_properties(&self, trigger: RefreshTrigger) -> Result<RefreshOutcome, ServerError> {
        let mut map = self.lock_map()?;
        let (stored, in_flight) = self.db.with_conn(|conn| {
            Ok((
                properties::load_properties(conn)?,
                jobs::load_in_flight_jobs(conn)?,
            ))
        })?;
        let next = map.replace_properties(stored, &in_flight);
        self.commit(&mut map, next, trigger, in_flight.len())
    }

    fn commit(
        &self,
        map: &mut MutexGuard<'_, MapState>,
        next: MapState,
        trigger: RefreshTrigger,
        jobs_seen: usize,
    ) -> Result<RefreshOutcome, ServerError> {
        let changed = !next.same_markers(&**map);
        let outcome = RefreshOutcome {
            revision: next.revision(),
            changed,
            markers: next.markers().len(),
            jobs_seen,
        };
        **map = next;

        self.db.with_conn(|conn| {
            record_refresh(
                conn,
                trigger,
                jobs_seen,
                outcome.markers,
                changed,
                outcome.revision,
            )
        })?;

        tracing::info!(
            trigger = trigger.as_str(),
            revision = outcome.revision,
            changed,
            markers = outcome.markers,
            jobs = jobs_seen,
            "Map refreshed"
        );
        Ok(outcome)
    }

    fn lock_map(&self) -> Result<MutexGuard<'_, MapState>, ServerError> {
        self.map.lock().map_err(|_| ServerError::InternalError)
    }
}
