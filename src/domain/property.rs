// src/domain/property.rs

use serde_json::Value;

/// A property as supplied by the property directory.
///
/// Only the identifying fields are lifted out. The full record is kept
/// verbatim because its coordinate layout varies between sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub record: Value,
}

impl Property {
    /// Builds a `Property` from a raw directory record.
    /// The record must be an object with a non-empty `id` (string or number).
    pub fn from_record(record: Value) -> Result<Self, String> {
        if !record.is_object() {
            return Err("Property record is not an object".to_string());
        }

        let id = match record.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err("Missing or empty property id".to_string()),
        };

        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let name = text("name");
        let city = text("city").or_else(|| {
            record
                .get("address")
                .and_then(|a| a.get("city"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        // `address` is either a display string or an object that may also
        // carry coordinates.
        let address = match record.get("address") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Object(obj)) => ["full", "street", "line"]
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        };

        Ok(Property {
            id,
            name,
            address,
            city,
            record,
        })
    }

    /// Converts a list of raw records, skipping (and logging) the unusable ones.
    pub fn from_records(records: Vec<Value>) -> Vec<Property> {
        records
            .into_iter()
            .filter_map(|r| match Property::from_record(r) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping property record");
                    None
                }
            })
            .collect()
    }
}
