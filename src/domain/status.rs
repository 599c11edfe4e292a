// src/domain/status.rs

use crate::domain::job::{Job, JobStatus};
use serde::Serialize;
use std::fmt;

/// The three-level signal shown on a map pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    Active,
    Pending,
    Inactive,
}

impl MarkerStatus {
    pub const ALL: [MarkerStatus; 3] = [
        MarkerStatus::Active,
        MarkerStatus::Pending,
        MarkerStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerStatus::Active => "active",
            MarkerStatus::Pending => "pending",
            MarkerStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        MarkerStatus::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for MarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&JobStatus> for MarkerStatus {
    fn from(status: &JobStatus) -> Self {
        match status {
            JobStatus::Accepted | JobStatus::InProgress => MarkerStatus::Active,
            JobStatus::Assigned | JobStatus::Pending | JobStatus::Offered => MarkerStatus::Pending,
            _ => MarkerStatus::Inactive,
        }
    }
}

/// Picks the status that represents a property with the given jobs.
///
/// The job with the highest status priority wins. On a tie the earliest
/// job wins. No jobs means `Inactive`.
pub fn prioritize(jobs: &[Job]) -> MarkerStatus {
    let mut winner: Option<&Job> = None;

    for job in jobs {
        let beats = winner.map_or(true, |w| job.status.priority() > w.status.priority());
        if beats {
            winner = Some(job);
        }
    }

    winner
        .map(|job| MarkerStatus::from(&job.status))
        .unwrap_or(MarkerStatus::Inactive)
}
