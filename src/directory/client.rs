// client.rs
use crate::directory::DirectoryError;
use crate::domain::property::Property;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

const USER_AGENT: &str = concat!("job_map/", env!("CARGO_PKG_VERSION"));

const MAX_ATTEMPTS: u64 = 4;
const MAX_BACKOFF_SECS: u64 = 8;
const JITTER_MAX_MILLIS: u64 = 500;

/// Blocking client for the external property directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    url: Url,
}

impl DirectoryClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        Ok(Self { client, url })
    }

    /// Fetches the full property list, retrying transient failures.
    pub fn fetch_properties(&self) -> Result<Vec<Property>, DirectoryError> {
        let body = self.fetch_with_retry()?;
        let records = extract_records(body)?;
        let total = records.len();
        let properties = Property::from_records(records);

        tracing::info!(
            url = %self.url,
            received = total,
            kept = properties.len(),
            "Fetched property directory"
        );
        Ok(properties)
    }

    fn fetch_with_retry(&self) -> Result<Value, DirectoryError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let start = Instant::now();

            match self.try_fetch() {
                Ok(body) => return Ok(body),
                // A body we cannot read will not improve on retry.
                Err(e @ (DirectoryError::JsonParse(_) | DirectoryError::UnexpectedShape(_))) => {
                    return Err(e)
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        elapsed = ?start.elapsed(),
                        error = %e,
                        "Property directory request failed"
                    );
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        std::thread::sleep(backoff(attempt));
                    }
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| DirectoryError::Network("directory retry loop failed".into())))
    }

    fn try_fetch(&self) -> Result<Value, DirectoryError> {
        let resp = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| DirectoryError::JsonParse(e.to_string()))
    }
}

/// Exponential backoff, capped, with a little random jitter.
fn backoff(attempt: u64) -> Duration {
    let base = std::cmp::min(1u64 << (attempt - 1), MAX_BACKOFF_SECS);
    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
    Duration::from_secs(base) + Duration::from_millis(jitter)
}

/// The directory answers either with a bare array or `{ "properties": [...] }`.
fn extract_records(body: Value) -> Result<Vec<Value>, DirectoryError> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("properties") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(DirectoryError::UnexpectedShape(
                "`properties` array missing".to_string(),
            )),
        },
        other => Err(DirectoryError::UnexpectedShape(format!(
            "expected array or object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
