//! Oral-history interview records shown as markers.

use super::search::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the marker latitude.
pub const LATITUDE_FIELD: &str = "Latitude";

/// Field holding the marker longitude.
pub const LONGITUDE_FIELD: &str = "Longitude";

/// An interview record as delivered by the data source.
///
/// The record is opaque apart from its id and the two coordinate fields; the
/// whole record travels with the `ui:interview:selected` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    /// Stable identifier, used as the marker key.
    pub id: String,
    /// Arbitrary record fields, including `Latitude` and `Longitude`.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Interview {
    /// Returns the marker position, if both coordinate fields are numeric.
    ///
    /// Numeric strings are accepted as well since spreadsheet exports often
    /// quote them.
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        let lat = Self::number_field(self.fields.get(LATITUDE_FIELD)?)?;
        let lng = Self::number_field(self.fields.get(LONGITUDE_FIELD)?)?;
        Some([lat, lng])
    }

    fn number_field(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
