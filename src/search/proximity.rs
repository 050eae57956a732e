use crate::dataset::{Coordinate, VendorRecord};
use crate::maps::{DistanceMatrix, DistanceMatrixRequest, MAX_DESTINATIONS_PER_REQUEST};
use crate::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::warn;

/// Anything strictly closer than this counts as walking distance
pub const WALKING_DISTANCE_METERS: u64 = 1000;

#[derive(Debug, Clone, Copy)]
pub struct ProximityOptions {
    /// Lookup batches allowed in flight at once
    pub concurrency: usize,
    /// Log batch details at info level
    pub verbose: bool,
}

impl Default for ProximityOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            verbose: false,
        }
    }
}

/// Keep the candidates within walking distance of `origin`.
///
/// Candidates are sent to the lookup in batches of at most
/// [`MAX_DESTINATIONS_PER_REQUEST`]. Output preserves candidate order for any
/// concurrency level. A failed lookup fails the whole filter.
pub async fn filter_by_walking_distance<'a>(
    lookup: &dyn DistanceMatrix,
    candidates: Vec<&'a VendorRecord>,
    origin: Coordinate,
    options: ProximityOptions,
) -> Result<Vec<&'a VendorRecord>> {
    let total = candidates.len();

    // Permits without a location can never be in range
    let located: Vec<(&'a VendorRecord, Coordinate)> = candidates
        .into_iter()
        .filter_map(|record| record.location.map(|coord| (record, coord)))
        .collect();

    if located.is_empty() {
        return Ok(Vec::new());
    }

    let origin = origin.to_string();
    let num_requests = located.len().div_ceil(MAX_DESTINATIONS_PER_REQUEST);
    verbose!(
        options.verbose,
        "Splitting {} candidates ({} without location) into {} batch requests",
        located.len(),
        total - located.len(),
        num_requests
    );

    let lookups: Vec<_> = located
        .chunks(MAX_DESTINATIONS_PER_REQUEST)
        .enumerate()
        .map(|(i, batch)| {
            lookup_batch(
                lookup,
                &origin,
                i * MAX_DESTINATIONS_PER_REQUEST,
                batch,
                options.verbose,
            )
        })
        .collect();

    let batches: Vec<Vec<&'a VendorRecord>> = stream::iter(lookups)
        .buffered(options.concurrency.max(1))
        .try_collect()
        .await?;

    Ok(batches.into_iter().flatten().collect())
}

async fn lookup_batch<'a>(
    lookup: &dyn DistanceMatrix,
    origin: &str,
    start: usize,
    batch: &[(&'a VendorRecord, Coordinate)],
    verbose: bool,
) -> Result<Vec<&'a VendorRecord>> {
    let destinations: Vec<String> = batch.iter().map(|(_, coord)| coord.to_string()).collect();

    verbose!(
        verbose,
        "Looking up candidates [{}, {}) from origin {}: {:?}",
        start,
        start + batch.len(),
        origin,
        destinations
    );

    let request = DistanceMatrixRequest::walking(origin.to_string(), destinations);
    let response = lookup.distance_matrix(&request).await?;

    verbose!(verbose, "Distance Matrix response: {:?}", response);

    let Some(row) = response.rows.first() else {
        warn!("Distance Matrix response for batch at {} has no rows", start);
        return Ok(Vec::new());
    };

    if row.elements.len() > batch.len() {
        warn!(
            "Distance Matrix returned {} elements for {} destinations; ignoring the extra",
            row.elements.len(),
            batch.len()
        );
    }

    let walkable = row
        .elements
        .iter()
        .zip(batch)
        .filter(|(element, _)| {
            element
                .meters()
                .is_some_and(|meters| meters < WALKING_DISTANCE_METERS)
        })
        .map(|(_, (record, _))| *record)
        .collect();

    Ok(walkable)
}
