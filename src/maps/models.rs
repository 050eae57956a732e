use serde::{Deserialize, Serialize};

/// Travel mode for distance lookups; only walking is ever requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
        }
    }
}

/// One Distance Matrix call: origins and destinations in `lat,lon` form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrixRequest {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub mode: TravelMode,
    pub language: String,
    pub departure_time: String,
}

impl DistanceMatrixRequest {
    /// Walking distances from a single origin, metric units
    pub fn walking(origin: String, destinations: Vec<String>) -> Self {
        Self {
            origins: vec![origin],
            destinations,
            mode: TravelMode::Walking,
            language: "en".to_string(),
            departure_time: "now".to_string(),
        }
    }
}

/// Distance Matrix API response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

/// Results for one origin, one element per destination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

impl DistanceMatrixElement {
    /// Distance in meters, if the element resolved
    pub fn meters(&self) -> Option<u64> {
        if self.status == "OK" {
            self.distance.as_ref().map(|d| d.value)
        } else {
            None
        }
    }
}

/// Human readable text plus the raw value (meters or seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}
