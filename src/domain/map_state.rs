// src/domain/map_state.rs

use crate::domain::aggregate::JobGroups;
use crate::domain::coordinates::GeoBounds;
use crate::domain::job::Job;
use crate::domain::markers::{build_markers, reconcile, MarkerSet};
use crate::domain::property::Property;
use std::sync::Arc;

/// Everything the map needs, as one value.
///
/// Updates never mutate in place: each one takes the current state plus new
/// input and returns the next state. `revision` only moves when the marker
/// set actually changed.
#[derive(Debug, Clone)]
pub struct MapState {
    properties: Arc<[Property]>,
    markers: MarkerSet,
    revision: u64,
    bounds: GeoBounds,
}

impl MapState {
    /// Initial state: one inactive marker per property with coordinates.
    pub fn new(properties: Vec<Property>, bounds: GeoBounds) -> Self {
        let markers = build_markers(&properties, &MarkerSet::default(), &bounds);
        Self {
            properties: properties.into(),
            markers,
            revision: 0,
            bounds,
        }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Folds a fresh in-flight job list into the markers.
    pub fn apply_jobs(&self, jobs: &[Job]) -> MapState {
        let groups = JobGroups::from_jobs(jobs);
        let markers = reconcile(&self.markers, &groups);
        self.with_markers(markers)
    }

    /// Swaps in a new property list, then folds the job list into it.
    pub fn replace_properties(&self, properties: Vec<Property>, jobs: &[Job]) -> MapState {
        let rebuilt = build_markers(&properties, &self.markers, &self.bounds);
        let groups = JobGroups::from_jobs(jobs);
        let markers = reconcile(&rebuilt, &groups);

        let mut next = self.with_markers(markers);
        next.properties = properties.into();
        next
    }

    /// True when `other` carries the very same marker set.
    pub fn same_markers(&self, other: &MapState) -> bool {
        self.markers.ptr_eq(&other.markers)
    }

    fn with_markers(&self, markers: MarkerSet) -> MapState {
        let revision = if markers.ptr_eq(&self.markers) {
            self.revision
        } else {
            self.revision + 1
        };

        MapState {
            properties: Arc::clone(&self.properties),
            markers,
            revision,
            bounds: self.bounds,
        }
    }
}
