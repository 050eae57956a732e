// Distance lookups against the Google Distance Matrix API

pub mod client;
pub mod models;

pub use client::GoogleMapsClient;
pub use models::{
    DistanceMatrixElement, DistanceMatrixRequest, DistanceMatrixResponse, DistanceMatrixRow,
    TextValue, TravelMode,
};

use crate::Result;
use async_trait::async_trait;

/// Upper bound on destinations the API accepts in one call
pub const MAX_DESTINATIONS_PER_REQUEST: usize = 25;

/// Anything that can answer a distance matrix request.
/// Kept as a trait so search can run against a mock in tests.
#[async_trait]
pub trait DistanceMatrix: Send + Sync {
    async fn distance_matrix(
        &self,
        request: &DistanceMatrixRequest,
    ) -> Result<DistanceMatrixResponse>;
}
