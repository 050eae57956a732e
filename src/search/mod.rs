// Keyword, proximity and recency pipeline over the loaded dataset

/// Log at info when the request asked for diagnostics, debug otherwise
macro_rules! verbose {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

pub mod proximity;

pub use proximity::{filter_by_walking_distance, ProximityOptions, WALKING_DISTANCE_METERS};

use crate::dataset::{Coordinate, Dataset, VendorRecord};
use crate::maps::DistanceMatrix;
use crate::{Error, Result};

/// One search request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub origin: Option<Coordinate>,
    pub newest_first: bool,
    /// Diagnostic logging only; never changes results
    pub verbose: bool,
}

impl SearchQuery {
    /// Keyword to filter on, ignoring empty strings
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }
}

/// Turn optional request coordinates into a search origin.
///
/// Both or neither must be given. A zero latitude or longitude disables
/// proximity filtering, since the permit data never places a vendor there.
pub fn resolve_origin(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Coordinate>> {
    let (latitude, longitude) = match (lat, lon) {
        (None, None) => return Ok(None),
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(Error::Validation(
                "lat and lon must be supplied together".to_string(),
            ))
        }
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::Validation(format!("lat out of range: {latitude}")));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::Validation(format!("lon out of range: {longitude}")));
    }

    if latitude == 0.0 || longitude == 0.0 {
        return Ok(None);
    }

    Ok(Some(Coordinate::new(latitude, longitude)))
}

/// Run a query against the dataset.
///
/// Steps run in a fixed order: keyword filter, proximity filter, then a
/// stable newest-first sort. Results borrow from the dataset.
pub async fn search<'a>(
    dataset: &'a Dataset,
    lookup: &dyn DistanceMatrix,
    query: &SearchQuery,
    concurrency: usize,
) -> Result<Vec<&'a VendorRecord>> {
    let mut results: Vec<&VendorRecord> = match query.keyword() {
        Some(keyword) => {
            verbose!(query.verbose, "Searching for vendors serving {:?}", keyword);
            let needle = keyword.to_lowercase();
            dataset
                .records()
                .iter()
                .filter(|record| record.offers(&needle))
                .collect()
        }
        None => dataset.records().iter().collect(),
    };

    if let Some(origin) = query.origin {
        verbose!(
            query.verbose,
            "Limiting {} vendors to walking distance of {}",
            results.len(),
            origin
        );
        let options = ProximityOptions {
            concurrency,
            verbose: query.verbose,
        };
        results = filter_by_walking_distance(lookup, results, origin, options).await?;
    }

    if query.newest_first {
        verbose!(query.verbose, "Prioritizing newest vendors");
        results.sort_by(|a, b| b.received.cmp(&a.received));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::APPROVED_STATUS;
    use crate::maps::{DistanceMatrixRequest, DistanceMatrixResponse};
    use async_trait::async_trait;

    struct NoLookup;

    #[async_trait]
    impl DistanceMatrix for NoLookup {
        async fn distance_matrix(
            &self,
            _request: &DistanceMatrixRequest,
        ) -> Result<DistanceMatrixResponse> {
            Err(Error::Internal("lookup should not be called".to_string()))
        }
    }

    fn vendor(name: &str, food_items: &str, received: u64) -> VendorRecord {
        VendorRecord {
            name: name.to_string(),
            facility_type: "Truck".to_string(),
            address: String::new(),
            status: APPROVED_STATUS.to_string(),
            food_items: food_items.to_string(),
            location: Some(Coordinate::new(37.78, -122.40)),
            received,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from(vec![
            vendor("a", "Tacos: Burritos", 20200101),
            vendor("b", "Soft PRETZELS", 20220101),
            vendor("c", "Coffee", 20210101),
            vendor("d", "pretzel bites", 20220101),
            vendor("e", "Hot dogs", 20190101),
        ])
    }

    fn names(records: &[&VendorRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_empty_query_returns_everything_in_order() {
        let dataset = dataset();
        let results = search(&dataset, &NoLookup, &SearchQuery::default(), 1)
            .await
            .unwrap();
        assert_eq!(names(&results), vec!["a", "b", "c", "d", "e"]);

        let query = SearchQuery {
            keyword: Some(String::new()),
            ..Default::default()
        };
        let results = search(&dataset, &NoLookup, &query, 1).await.unwrap();
        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn test_keyword_is_case_insensitive() {
        let dataset = dataset();
        let query = SearchQuery {
            keyword: Some("Pretzel".to_string()),
            ..Default::default()
        };

        let results = search(&dataset, &NoLookup, &query, 1).await.unwrap();
        assert_eq!(names(&results), vec!["b", "d"]);
    }

    #[tokio::test]
    async fn test_every_record_found_by_its_own_offerings() {
        let dataset = dataset();
        for record in dataset.records() {
            let query = SearchQuery {
                keyword: Some(record.food_items[1..4].to_uppercase()),
                ..Default::default()
            };
            let results = search(&dataset, &NoLookup, &query, 1).await.unwrap();
            assert!(results.contains(&record));
        }
    }

    #[tokio::test]
    async fn test_unmatched_keyword_is_empty_not_error() {
        let dataset = dataset();
        let query = SearchQuery {
            keyword: Some("XXX".to_string()),
            ..Default::default()
        };

        let results = search(&dataset, &NoLookup, &query, 1).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_newest_first_is_stable() {
        let dataset = dataset();
        let query = SearchQuery {
            newest_first: true,
            ..Default::default()
        };

        let results = search(&dataset, &NoLookup, &query, 1).await.unwrap();
        assert_eq!(names(&results), vec!["b", "d", "c", "a", "e"]);
        assert!(results.windows(2).all(|w| w[0].received >= w[1].received));
    }

    #[test]
    fn test_resolve_origin() {
        assert_eq!(resolve_origin(None, None).unwrap(), None);
        assert_eq!(
            resolve_origin(Some(37.79), Some(-122.39)).unwrap(),
            Some(Coordinate::new(37.79, -122.39))
        );
        assert_eq!(resolve_origin(Some(0.0), Some(-122.39)).unwrap(), None);

        assert!(matches!(
            resolve_origin(Some(37.79), None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            resolve_origin(None, Some(-122.39)),
            Err(Error::Validation(_))
        ));
        assert!(resolve_origin(Some(91.0), Some(-122.39)).is_err());
        assert!(resolve_origin(Some(f64::NAN), Some(-122.39)).is_err());
    }
}
