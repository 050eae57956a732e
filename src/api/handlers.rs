use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::models::*, config::Settings, dataset::Dataset, maps::DistanceMatrix, search, Error,
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub lookup: Arc<dyn DistanceMatrix>,
    pub settings: Settings,
}

/// GET /foodtrucks - Search approved food trucks
pub async fn get_food_trucks(
    State(state): State<AppState>,
    Query(params): Query<FoodTruckParams>,
) -> Result<Response> {
    if params.debug.is_some() {
        info!("get_food_trucks called with: {:?}", params);
    } else {
        debug!("Food truck request: {:?}", params);
    }

    let query = params.into_query()?;

    let results = search::search(
        &state.dataset,
        state.lookup.as_ref(),
        &query,
        state.settings.maps.concurrency,
    )
    .await?;

    debug!("Returning {} food trucks", results.len());

    let body = serde_json::to_string_pretty(&results)
        .map_err(|e| Error::Internal(format!("Failed to serialize results: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        vendors: state.dataset.len(),
    }))
}
