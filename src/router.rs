use crate::app::App;
use crate::db::jobs::find_job;
use crate::db::refreshes::{get_recent_refreshes, RefreshTrigger};
use crate::domain::{Job, MarkerStatus, Property};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, ResultResp};
use crate::templates;
use astra::Request;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 8 * 1024 * 1024;
const RECENT_REFRESHES: usize = 50;

/// Job pushes arrive one at a time from realtime listeners, or in batches.
#[derive(Deserialize)]
#[serde(untagged)]
enum JobPayload {
    Many(Vec<Job>),
    One(Job),
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let state = app.snapshot()?;
            html_response(templates::pages::overview_page(&state))
        }
        ("GET", "/markers") => list_markers(&req, app),
        ("GET", "/markers/summary") => {
            let state = app.snapshot()?;
            json_response(200, &state.markers().summary())
        }
        ("GET", p) if p.starts_with("/markers/") => {
            let id = &p["/markers/".len()..];
            let state = app.snapshot()?;
            let marker = state.markers().get(id).ok_or(ServerError::NotFound)?;
            json_response(200, &**marker)
        }
        ("POST", "/jobs") => {
            let jobs = match serde_json::from_slice::<JobPayload>(&read_body(req)?)? {
                JobPayload::Many(jobs) => jobs,
                JobPayload::One(job) => vec![job],
            };
            let outcome = app.apply_job_updates(&jobs)?;
            json_response(200, &outcome)
        }
        ("GET", p) if p.starts_with("/jobs/") => {
            let id = &p["/jobs/".len()..];
            let job = app
                .db
                .with_conn(|conn| find_job(conn, id))?
                .ok_or(ServerError::NotFound)?;
            json_response(200, &job)
        }
        ("POST", "/refresh") => {
            let outcome = app.refresh_jobs(RefreshTrigger::JobUpdate)?;
            json_response(200, &outcome)
        }
        ("POST", "/properties") => {
            let records: Vec<Value> = serde_json::from_slice(&read_body(req)?)?;
            let properties = Property::from_records(records);
            let outcome =
                app.import_properties(&properties, false, RefreshTrigger::PropertyImport)?;
            json_response(200, &outcome)
        }
        ("POST", "/properties/sync") => {
            let outcome = app.sync_directory()?;
            json_response(200, &outcome)
        }
        ("GET", "/refreshes") => {
            let refreshes = app
                .db
                .with_conn(|conn| get_recent_refreshes(conn, RECENT_REFRESHES))?;
            json_response(200, &refreshes)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn list_markers(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let state = app.snapshot()?;

    let markers: Vec<_> = match params.get("status") {
        Some(raw) => {
            let status = MarkerStatus::parse(raw)
                .ok_or_else(|| ServerError::BadRequest(format!("Unknown marker status: {raw}")))?;
            state.markers().with_status(status)
        }
        None => state.markers().iter().map(|m| &**m).collect(),
    };

    json_response(
        200,
        &json!({
            "revision": state.revision(),
            "markers": markers,
        }),
    )
}

fn read_body(mut req: Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;
    Ok(buf)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Browsers get HTML error pages; API clients get JSON.
pub fn wants_html(req: &Request) -> bool {
    req.headers()
        .get("Accept")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}
