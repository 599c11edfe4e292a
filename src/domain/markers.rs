// src/domain/markers.rs

use crate::domain::aggregate::JobGroups;
use crate::domain::coordinates::{resolve_coordinates, Coordinate, GeoBounds};
use crate::domain::job::Job;
use crate::domain::property::Property;
use crate::domain::status::{prioritize, MarkerStatus};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// The map-visible form of a property. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyMarker {
    /// Same as the property id.
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub coordinates: Coordinate,
    pub status: MarkerStatus,
    pub jobs: Vec<Job>,
}

impl PropertyMarker {
    /// Builds a marker for a property, or `None` when it has no usable coordinates.
    pub fn for_property(property: &Property, bounds: &GeoBounds) -> Option<Self> {
        let coordinates = resolve_coordinates(&property.id, &property.record)?
            .validate(&property.id, bounds)?;

        Some(PropertyMarker {
            id: property.id.clone(),
            name: property.name.clone(),
            address: property.address.clone(),
            coordinates,
            status: MarkerStatus::Inactive,
            jobs: Vec::new(),
        })
    }

    /// Same pin on the map: identity and placement match, job state ignored.
    fn same_placement(&self, other: &PropertyMarker) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.address == other.address
            && self.coordinates == other.coordinates
    }
}

/// Ordered, shareable collection of markers.
///
/// Cloning is cheap. Two sets that are `ptr_eq` are guaranteed identical,
/// which lets a consumer skip work when a refresh changed nothing.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    markers: Arc<[Arc<PropertyMarker>]>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerSummary {
    pub active: usize,
    pub pending: usize,
    pub inactive: usize,
    pub total: usize,
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet::new(Vec::new())
    }
}

impl MarkerSet {
    pub fn new(markers: Vec<Arc<PropertyMarker>>) -> Self {
        Self {
            markers: markers.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyMarker>> {
        self.markers.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<PropertyMarker>> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn ptr_eq(&self, other: &MarkerSet) -> bool {
        Arc::ptr_eq(&self.markers, &other.markers)
    }

    pub fn with_status(&self, status: MarkerStatus) -> Vec<&PropertyMarker> {
        self.markers
            .iter()
            .filter(|m| m.status == status)
            .map(|m| &**m)
            .collect()
    }

    pub fn summary(&self) -> MarkerSummary {
        let mut summary = MarkerSummary {
            total: self.markers.len(),
            ..MarkerSummary::default()
        };
        for marker in self.markers.iter() {
            match marker.status {
                MarkerStatus::Active => summary.active += 1,
                MarkerStatus::Pending => summary.pending += 1,
                MarkerStatus::Inactive => summary.inactive += 1,
            }
        }
        summary
    }

    /// True when both sets hold the same marker allocations in the same order.
    fn same_members(&self, markers: &[Arc<PropertyMarker>]) -> bool {
        self.markers.len() == markers.len()
            && self
                .markers
                .iter()
                .zip(markers)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

/// Builds the marker set for a property list.
///
/// Properties without usable coordinates are left out. A marker from
/// `previous` is reused as-is when its property still sits at the same place,
/// and `previous` itself is returned when nothing differs.
pub fn build_markers(
    properties: &[Property],
    previous: &MarkerSet,
    bounds: &GeoBounds,
) -> MarkerSet {
    let by_id: HashMap<&str, &Arc<PropertyMarker>> =
        previous.iter().map(|m| (m.id.as_str(), m)).collect();

    let markers: Vec<Arc<PropertyMarker>> = properties
        .iter()
        .filter_map(|p| PropertyMarker::for_property(p, bounds))
        .map(|fresh| match by_id.get(fresh.id.as_str()) {
            Some(old) if old.same_placement(&fresh) => Arc::clone(old),
            _ => Arc::new(fresh),
        })
        .collect();

    if previous.same_members(&markers) {
        return previous.clone();
    }
    MarkerSet::new(markers)
}

/// Folds the current job groups into an existing marker set.
///
/// A marker whose derived status and job count are unchanged keeps its
/// allocation. When no marker changed, `previous` is returned unchanged.
pub fn reconcile(previous: &MarkerSet, groups: &JobGroups) -> MarkerSet {
    let mut changed = false;

    let markers: Vec<Arc<PropertyMarker>> = previous
        .iter()
        .map(|marker| {
            let jobs = groups.jobs_for(&marker.id);
            let status = prioritize(jobs);

            if marker.status == status && marker.jobs.len() == jobs.len() {
                return Arc::clone(marker);
            }

            changed = true;
            tracing::debug!(
                property_id = %marker.id,
                from = %marker.status,
                to = %status,
                jobs = jobs.len(),
                "marker changed"
            );
            Arc::new(PropertyMarker {
                status,
                jobs: jobs.to_vec(),
                ..PropertyMarker::clone(marker)
            })
        })
        .collect();

    if !changed {
        return previous.clone();
    }
    MarkerSet::new(markers)
}
