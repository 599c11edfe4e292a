// src/domain/aggregate.rs

use crate::domain::job::Job;
use std::collections::HashMap;

/// In-flight jobs grouped by property id. Each group keeps input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobGroups {
    groups: HashMap<String, Vec<Job>>,
}

impl JobGroups {
    /// Groups jobs in a single pass. Jobs without a property id are skipped.
    pub fn from_jobs<'a, I>(jobs: I) -> Self
    where
        I: IntoIterator<Item = &'a Job>,
    {
        let mut groups: HashMap<String, Vec<Job>> = HashMap::new();

        for job in jobs {
            match job.property_id.as_deref() {
                Some(pid) if !pid.is_empty() => {
                    groups.entry(pid.to_string()).or_default().push(job.clone());
                }
                _ => tracing::debug!(job_id = %job.id, "Job has no property id, skipping"),
            }
        }

        Self { groups }
    }

    /// Jobs for one property; empty when the property has none.
    pub fn jobs_for(&self, property_id: &str) -> &[Job] {
        self.groups
            .get(property_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn property_count(&self) -> usize {
        self.groups.len()
    }
}
