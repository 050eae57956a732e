use crate::search::{resolve_origin, SearchQuery};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Query parameters for GET /foodtrucks.
/// `newest` and `debug` are flags: present with any value means set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodTruckParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub newest: Option<String>,
    #[serde(default)]
    pub debug: Option<String>,
}

impl FoodTruckParams {
    /// Validate parameters and build the search query
    pub fn into_query(self) -> Result<SearchQuery> {
        let lat = self.lat.as_deref().map(|v| parse_degrees("lat", v)).transpose()?;
        let lon = self.lon.as_deref().map(|v| parse_degrees("lon", v)).transpose()?;

        Ok(SearchQuery {
            keyword: self.search.filter(|s| !s.is_empty()),
            origin: resolve_origin(lat, lon)?,
            newest_first: self.newest.is_some(),
            verbose: self.debug.is_some(),
        })
    }
}

fn parse_degrees(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Validation(format!("{name} must be a number, got {value:?}")))
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub vendors: usize,
}
