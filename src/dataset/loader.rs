use crate::dataset::models::{Coordinate, Dataset, VendorRecord, APPROVED_STATUS};
use crate::error::{Error, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// Positional columns of the permit file
const COL_NAME: usize = 1;
const COL_FACILITY_TYPE: usize = 2;
const COL_ADDRESS: usize = 5;
const COL_STATUS: usize = 10;
const COL_FOOD_ITEMS: usize = 11;
const COL_LATITUDE: usize = 14;
const COL_LONGITUDE: usize = 15;
const COL_RECEIVED: usize = 20;

/// Minimum number of fields a data row must have
pub const MIN_FIELDS: usize = COL_RECEIVED + 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip rows that fail to parse instead of aborting the load
    pub skip_malformed: bool,
}

/// Load the permit dataset from a CSV file on disk
pub fn load_from_path(path: impl AsRef<Path>, options: LoadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let dataset = load_from_reader(file, options)?;

    info!(
        "Loaded {} approved vendors from {:?} ({} rows read, {} skipped)",
        dataset.len(),
        path,
        dataset.rows_read(),
        dataset.rows_skipped()
    );

    Ok(dataset)
}

/// Load the permit dataset from any CSV source. The first row is a header.
pub fn load_from_reader<R: Read>(reader: R, options: LoadOptions) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut rows_read = 0;
    let mut rows_skipped = 0;

    for row in csv_reader.records() {
        rows_read += 1;

        let parsed = row.map_err(Error::from).and_then(|row| parse_row(&row));

        match parsed {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) if options.skip_malformed && is_recoverable(&e) => {
                warn!("Skipping malformed row: {}", e);
                rows_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Dataset::new(records, rows_read, rows_skipped))
}

fn is_recoverable(error: &Error) -> bool {
    match error {
        Error::Parse(_) => true,
        Error::Csv(e) => !e.is_io_error(),
        _ => false,
    }
}

/// Parse one data row. Returns `None` for rows that are not approved.
fn parse_row(row: &StringRecord) -> Result<Option<VendorRecord>> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();

    if row.len() < MIN_FIELDS {
        return Err(Error::Parse(format!(
            "line {line}: expected at least {MIN_FIELDS} fields, found {}",
            row.len()
        )));
    }

    // Freshness is validated before the status filter, so a malformed
    // row fails the load even if it would have been dropped
    let received_raw = row[COL_RECEIVED].trim();
    let received = received_raw.parse::<u64>().map_err(|_| {
        Error::Parse(format!(
            "line {line}: received value {received_raw:?} is not a non-negative integer"
        ))
    })?;

    if &row[COL_STATUS] != APPROVED_STATUS {
        return Ok(None);
    }

    let location = parse_location(line, &row[COL_LATITUDE], &row[COL_LONGITUDE]);

    Ok(Some(VendorRecord {
        name: row[COL_NAME].to_string(),
        facility_type: row[COL_FACILITY_TYPE].to_string(),
        address: row[COL_ADDRESS].to_string(),
        status: row[COL_STATUS].to_string(),
        food_items: row[COL_FOOD_ITEMS].to_string(),
        location,
        received,
    }))
}

/// Empty, zero or unparsable fields leave the permit without a location.
/// The row itself is still kept.
fn parse_location(line: u64, lat: &str, lon: &str) -> Option<Coordinate> {
    let (lat, lon) = (lat.trim(), lon.trim());
    if lat.is_empty() && lon.is_empty() {
        return None;
    }

    let (Ok(latitude), Ok(longitude)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
        warn!(
            "line {}: unusable coordinates ({:?}, {:?}), treating as no location",
            line, lat, lon
        );
        return None;
    };

    if latitude == 0.0 && longitude == 0.0 {
        return None;
    }

    Some(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "locationid,Applicant,FacilityType,cnn,LocationDescription,Address,blocklot,block,lot,permit,Status,FoodItems,X,Y,Latitude,Longitude,Schedule,dayshours,NOISent,Approved,Received,PriorPermit,ExpirationDate,Location";

    fn row(name: &str, status: &str, food: &str, lat: &str, lon: &str, received: &str) -> String {
        format!(
            "1,{name},Truck,1,desc,1 Main St,bl,b,l,P1,{status},{food},0,0,{lat},{lon},sched,,,,{received},0,,"
        )
    }

    fn csv(rows: &[String]) -> String {
        let mut out = String::from(HEADER);
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out
    }

    #[test]
    fn test_keeps_only_approved_rows() {
        let data = csv(&[
            row("A", "APPROVED", "Tacos", "37.7", "-122.4", "20210101"),
            row("B", "REQUESTED", "Tacos", "37.7", "-122.4", "20210102"),
            row("C", "approved", "Tacos", "37.7", "-122.4", "20210103"),
            row("D", "APPROVED", "Pretzels", "", "", "20210104"),
        ]);

        let dataset = load_from_reader(data.as_bytes(), LoadOptions::default()).unwrap();

        assert_eq!(dataset.rows_read(), 4);
        assert_eq!(dataset.len(), 2);
        assert!(dataset
            .records()
            .iter()
            .all(|r| r.status == APPROVED_STATUS));
        assert_eq!(dataset.records()[0].name, "A");
        assert_eq!(dataset.records()[1].name, "D");
        assert_eq!(dataset.records()[1].location, None);
        assert_eq!(
            dataset.records()[0].location,
            Some(Coordinate::new(37.7, -122.4))
        );
    }

    #[test]
    fn test_header_only_and_empty_sources() {
        let dataset = load_from_reader(HEADER.as_bytes(), LoadOptions::default()).unwrap();
        assert!(dataset.is_empty());

        let dataset = load_from_reader("".as_bytes(), LoadOptions::default()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_non_numeric_received_is_parse_error() {
        let data = csv(&[row("A", "REQUESTED", "Tacos", "", "", "soon")]);

        let result = load_from_reader(data.as_bytes(), LoadOptions::default());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let data = format!("{HEADER}\n1,A,Truck,1");

        let result = load_from_reader(data.as_bytes(), LoadOptions::default());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_skip_malformed_rows() {
        let data = csv(&[
            row("A", "APPROVED", "Tacos", "37.7", "-122.4", "20210101"),
            row("B", "APPROVED", "Tacos", "37.7", "-122.4", "-5"),
            "1,C,Truck,1".to_string(),
            row("D", "APPROVED", "Tacos", "37.7", "-122.4", "20210101"),
        ]);

        let options = LoadOptions {
            skip_malformed: true,
        };
        let dataset = load_from_reader(data.as_bytes(), options).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows_skipped(), 2);
    }

    #[test]
    fn test_zero_or_bad_coordinates_mean_no_location() {
        assert_eq!(parse_location(2, "0", "0"), None);
        assert_eq!(parse_location(2, " ", ""), None);
        assert_eq!(parse_location(2, "37.7", ""), None);
        assert_eq!(parse_location(2, "N/A", "N/A"), None);
        assert_eq!(
            parse_location(2, "37.7", "-122.4"),
            Some(Coordinate::new(37.7, -122.4))
        );
    }

    #[test]
    fn test_bad_coordinates_keep_the_row() {
        let data = csv(&[
            row("A", "APPROVED", "Tacos", "37.7", "", "20210101"),
            row("B", "APPROVED", "Tacos", "N/A", "N/A", "20210102"),
            row("C", "APPROVED", "Tacos", "37.7", "-122.4", "20210103"),
        ]);

        let dataset = load_from_reader(data.as_bytes(), LoadOptions::default()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].location, None);
        assert_eq!(dataset.records()[1].location, None);
        assert_eq!(
            dataset.records()[2].location,
            Some(Coordinate::new(37.7, -122.4))
        );
    }

    #[test]
    fn test_load_from_file_on_disk() {
        use std::io::Write;

        let data = csv(&[
            row("A", "APPROVED", "Tacos", "37.7", "-122.4", "20210101"),
            row("B", "EXPIRED", "Tacos", "37.7", "-122.4", "20210102"),
        ]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data.as_bytes()).unwrap();
        file.flush().unwrap();

        let dataset = load_from_path(file.path(), LoadOptions::default()).unwrap();

        assert_eq!(dataset.rows_read(), 2);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].name, "A");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_path("does/not/exist.csv", LoadOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
