use serde::{Deserialize, Serialize};

/// A single completed bike trip. Journeys are never modified once stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Return")]
    pub return_time: String,
    #[serde(rename = "DepartureStationId")]
    pub departure_station_id: i32,
    #[serde(rename = "DepartureStationName")]
    pub departure_station_name: String,
    #[serde(rename = "ReturnStationId")]
    pub return_station_id: i32,
    #[serde(rename = "ReturnStationName")]
    pub return_station_name: String,
    /// Distance in metres.
    #[serde(rename = "CoveredDistanceM")]
    pub covered_distance_m: f64,
    /// Duration in seconds.
    #[serde(rename = "DurationSec")]
    pub duration_sec: i32,
}
