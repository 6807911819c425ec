use serde::{Deserialize, Serialize};

/// Derived aggregate of posts sharing a location. Never persisted
/// client-side; the place aggregator is the only writer.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub num_post: u32,
}

/// Normalizes a raw map coordinate to 4 decimal places (~11 m), rounding
/// half away from zero. Used both for grouping keys and for map clicks
/// entering the creation flow.
pub fn round_coord(coord: f64) -> f64 {
    (coord * 10_000.0).round() / 10_000.0
}
