// Permit dataset: in-memory model and CSV loader

pub mod loader;
pub mod models;

pub use loader::{load_from_path, load_from_reader, LoadOptions};
pub use models::{Coordinate, Dataset, VendorRecord, APPROVED_STATUS};
