use crate::config::Settings;
use crate::dataset::{self, LoadOptions};
use crate::maps::{DistanceMatrix, DistanceMatrixRequest, DistanceMatrixResponse, GoogleMapsClient};
use crate::search::{self, resolve_origin, SearchQuery};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Stand-in lookup for searches that never reach the proximity step
struct LookupDisabled;

#[async_trait]
impl DistanceMatrix for LookupDisabled {
    async fn distance_matrix(
        &self,
        _request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse> {
        Err(Error::Config(
            "GOOGLE_MAPS_API_KEY env var needs to be set".to_string(),
        ))
    }
}

/// Run a search against the permit file and render the results as JSON
pub async fn search(
    settings: &Settings,
    data: Option<PathBuf>,
    keyword: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    newest: bool,
    debug: bool,
) -> Result<String> {
    let query = SearchQuery {
        keyword,
        origin: resolve_origin(lat, lon)?,
        newest_first: newest,
        verbose: debug,
    };

    let path = data.unwrap_or_else(|| settings.dataset.path.clone());
    let dataset = dataset::load_from_path(
        &path,
        LoadOptions {
            skip_malformed: settings.dataset.skip_malformed,
        },
    )?;

    // Only demand an API key when the query will actually use it
    let lookup: Box<dyn DistanceMatrix> = if query.origin.is_some() {
        Box::new(GoogleMapsClient::new(&settings.maps)?)
    } else {
        Box::new(LookupDisabled)
    };

    let results =
        search::search(&dataset, lookup.as_ref(), &query, settings.maps.concurrency).await?;

    serde_json::to_string_pretty(&results)
        .map_err(|e| Error::Internal(format!("Failed to serialize results: {e}")))
}
