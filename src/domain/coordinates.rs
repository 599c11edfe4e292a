// src/domain/coordinates.rs

use serde::Serialize;
use serde_json::Value;

// Property records reach us in one of four layouts:
//
// record
//  ├── location
//  │    └── coordinates { latitude, longitude }   (1)
//  ├── coordinates { latitude, longitude }        (2)
//  ├── address
//  │    └── coordinates { latitude, longitude }   (3)
//  ├── latitude                                   (4)
//  └── longitude                                  (4)

/// A coordinate pair exactly as found in the record, before type checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoordinate<'a> {
    pub latitude: &'a Value,
    pub longitude: &'a Value,
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

type Accessor = for<'a> fn(&'a Value) -> Option<RawCoordinate<'a>>;

/// Coordinate layouts in priority order. The first one that yields a pair wins.
const ACCESSORS: [(&str, Accessor); 4] = [
    ("location.coordinates", location_coordinates),
    ("coordinates", top_level_coordinates),
    ("address.coordinates", address_coordinates),
    ("latitude/longitude", flat_fields),
];

fn location_coordinates(record: &Value) -> Option<RawCoordinate<'_>> {
    pair_in(record.get("location")?.get("coordinates")?)
}

fn top_level_coordinates(record: &Value) -> Option<RawCoordinate<'_>> {
    pair_in(record.get("coordinates")?)
}

fn address_coordinates(record: &Value) -> Option<RawCoordinate<'_>> {
    pair_in(record.get("address")?.get("coordinates")?)
}

fn flat_fields(record: &Value) -> Option<RawCoordinate<'_>> {
    pair_in(record)
}

/// Reads `latitude`/`longitude` from an object. Both must be truthy.
fn pair_in(obj: &Value) -> Option<RawCoordinate<'_>> {
    let latitude = obj.get("latitude").filter(|v| is_truthy(v))?;
    let longitude = obj.get("longitude").filter(|v| is_truthy(v))?;
    Some(RawCoordinate {
        latitude,
        longitude,
    })
}

/// Loose presence test: null, false, zero, NaN and empty strings count as absent.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Finds the coordinate pair of a property record, trying each known layout in order.
/// Logs a warning and returns `None` when no layout carries a pair.
pub fn resolve_coordinates<'a>(property_id: &str, record: &'a Value) -> Option<RawCoordinate<'a>> {
    let found = ACCESSORS
        .iter()
        .find_map(|(layout, accessor)| accessor(record).map(|raw| (*layout, raw)));

    match found {
        Some((layout, raw)) => {
            tracing::trace!(property_id, layout, "resolved coordinates");
            Some(raw)
        }
        None => {
            tracing::warn!(property_id, "No coordinates found for property");
            None
        }
    }
}

/// Rectangular region the business operates in. Used for a soft sanity check only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        // Surat Thani province and the gulf islands.
        Self {
            min_latitude: 9.0,
            min_longitude: 99.0,
            max_latitude: 10.5,
            max_longitude: 100.5,
        }
    }
}

impl GeoBounds {
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&c.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&c.longitude)
    }
}

impl RawCoordinate<'_> {
    /// Converts to a typed coordinate. Both values must be finite JSON numbers.
    ///
    /// A pair outside `bounds` is still returned; it only produces a warning.
    pub fn validate(&self, property_id: &str, bounds: &GeoBounds) -> Option<Coordinate> {
        let latitude = self.latitude.as_f64().filter(|f| f.is_finite());
        let longitude = self.longitude.as_f64().filter(|f| f.is_finite());

        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            tracing::warn!(
                property_id,
                latitude = %self.latitude,
                longitude = %self.longitude,
                "Non-numeric coordinates, skipping property"
            );
            return None;
        };

        let coordinate = Coordinate {
            latitude,
            longitude,
        };

        if !bounds.contains(&coordinate) {
            tracing::warn!(
                property_id,
                latitude,
                longitude,
                "Coordinates outside the service region"
            );
        }

        Some(coordinate)
    }
}
