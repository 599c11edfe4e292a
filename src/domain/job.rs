// src/domain/job.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a job as reported by the job system.
///
/// Unknown strings are kept verbatim in `Other` so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Offered,
    Assigned,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Offered => "offered",
            JobStatus::Assigned => "assigned",
            JobStatus::Accepted => "accepted",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Other(s) => s,
        }
    }

    /// Rank used to pick the status that represents a property on the map.
    pub fn priority(&self) -> u8 {
        match self {
            JobStatus::InProgress => 4,
            JobStatus::Accepted => 3,
            JobStatus::Assigned | JobStatus::Pending | JobStatus::Offered => 2,
            _ => 0,
        }
    }

    /// Completed and cancelled jobs no longer belong on the map.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => JobStatus::Pending,
            "offered" => JobStatus::Offered,
            "assigned" => JobStatus::Assigned,
            "accepted" => JobStatus::Accepted,
            "in_progress" => JobStatus::InProgress,
            "completed" => JobStatus::Completed,
            "cancelled" => JobStatus::Cancelled,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        JobStatus::from(s.as_str())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work at a property, owned by the external job system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "property_id")]
    pub property_id: Option<String>,
    pub status: JobStatus,
    /// Free-form urgency hint from the job system ("high", "normal", ...).
    #[serde(default)]
    pub priority: Option<String>,
}
