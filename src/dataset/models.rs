use serde::{Deserialize, Serialize};
use std::fmt;

/// Status value a permit must carry to be served
pub const APPROVED_STATUS: &str = "APPROVED";

/// A point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Renders as `lat,lon`, the form the Distance Matrix API accepts
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// One approved food vendor permit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRecord {
    pub name: String,
    /// "Truck", "Push Cart", or empty
    pub facility_type: String,
    pub address: String,
    pub status: String,
    /// Free-text description of what the vendor sells
    pub food_items: String,
    pub location: Option<Coordinate>,
    /// Freshness marker; higher means a more recently received permit
    pub received: u64,
}

impl VendorRecord {
    /// Case-insensitive substring match against the offerings text.
    /// `needle` must already be lowercased.
    pub fn offers(&self, needle: &str) -> bool {
        self.food_items.to_lowercase().contains(needle)
    }
}

/// Immutable set of approved vendors, in file order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<VendorRecord>,
    rows_read: usize,
    rows_skipped: usize,
}

impl Dataset {
    pub fn new(records: Vec<VendorRecord>, rows_read: usize, rows_skipped: usize) -> Self {
        Self {
            records,
            rows_read,
            rows_skipped,
        }
    }

    pub fn records(&self) -> &[VendorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Data rows read from the source, header excluded
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Malformed rows dropped in lenient mode
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }
}

impl From<Vec<VendorRecord>> for Dataset {
    fn from(records: Vec<VendorRecord>) -> Self {
        let rows_read = records.len();
        Self::new(records, rows_read, 0)
    }
}
