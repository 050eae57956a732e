use crate::config::MapsConfig;
use crate::maps::models::{DistanceMatrixRequest, DistanceMatrixResponse};
use crate::maps::{DistanceMatrix, MAX_DESTINATIONS_PER_REQUEST};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// Google Distance Matrix API client
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GoogleMapsClient {
    /// Create a new client. Fails if no API key is configured.
    pub fn new(config: &MapsConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let endpoint = Url::parse(&config.base_url)?.join(DISTANCE_MATRIX_PATH)?;

        let client = Client::builder()
            .user_agent(format!("foodtrucks/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Request URL without the API key, safe to log
    fn request_url(&self, request: &DistanceMatrixRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("origins", &request.origins.join("|"))
            .append_pair("destinations", &request.destinations.join("|"))
            .append_pair("mode", request.mode.as_str())
            .append_pair("units", "metric")
            .append_pair("language", &request.language)
            .append_pair("departure_time", &request.departure_time);
        url
    }
}

#[async_trait]
impl DistanceMatrix for GoogleMapsClient {
    async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse> {
        if request.origins.is_empty() {
            return Err(Error::Validation("At least one origin is required".to_string()));
        }
        if request.destinations.is_empty()
            || request.destinations.len() > MAX_DESTINATIONS_PER_REQUEST
        {
            return Err(Error::Validation(format!(
                "Expected 1 to {} destinations, got {}",
                MAX_DESTINATIONS_PER_REQUEST,
                request.destinations.len()
            )));
        }

        let url = self.request_url(request);
        debug!("Distance Matrix request: GET {}", url);

        let mut signed = url;
        signed.query_pairs_mut().append_pair("key", &self.api_key);

        let response = self
            .client
            .get(signed)
            .send()
            .await
            .map_err(|e| Error::ExternalLookup(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            error!("Distance Matrix API error: HTTP {}", status);
            return Err(Error::ExternalLookup(format!("HTTP {status}")));
        }

        let body = response
            .json::<DistanceMatrixResponse>()
            .await
            .map_err(|e| {
                Error::ExternalLookup(format!("failed to parse response: {}", e.without_url()))
            })?;

        if body.status != "OK" {
            let detail = body.error_message.as_deref().unwrap_or("no details");
            error!("Distance Matrix API status {}: {}", body.status, detail);
            return Err(Error::ExternalLookup(format!("{}: {}", body.status, detail)));
        }

        Ok(body)
    }
}
