use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub maps: MapsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub skip_malformed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Google Maps API key; never serialized
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Number of distance lookup batches allowed in flight at once
    pub concurrency: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let path = std::env::var("DATA_PATH")
            .unwrap_or_else(|_| "Mobile_Food_Facility_Permit.csv".to_string())
            .into();

        let skip_malformed = std::env::var("DATASET_SKIP_MALFORMED")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DATASET_SKIP_MALFORMED value".to_string()))?;

        let api_key = std::env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let base_url = std::env::var("MAPS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MAPS_BASE_URL.to_string());

        let timeout_seconds = std::env::var("MAPS_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAPS_TIMEOUT_SECONDS value".to_string()))?;

        let concurrency = std::env::var("MAPS_CONCURRENCY")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAPS_CONCURRENCY value".to_string()))?;

        Ok(Settings {
            server: ServerConfig { host, port },
            dataset: DatasetConfig {
                path,
                skip_malformed,
            },
            maps: MapsConfig {
                api_key,
                base_url,
                timeout_seconds,
                concurrency,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.maps.timeout_seconds == 0 {
            return Err(Error::Config("Maps timeout must be non-zero".to_string()));
        }

        if self.maps.concurrency == 0 {
            return Err(Error::Config(
                "Maps concurrency must be at least 1".to_string(),
            ));
        }

        url::Url::parse(&self.maps.base_url)?;

        Ok(())
    }
}

impl MapsConfig {
    /// The API key, or a configuration error when it is not set
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GOOGLE_MAPS_API_KEY env var needs to be set".to_string()))
    }
}
