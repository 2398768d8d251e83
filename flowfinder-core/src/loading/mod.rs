//! Reading the venue tables from CSV files into a [`crate::VenueSnapshot`]

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::{load_snapshot, snapshot_from_readers};
pub use config::SnapshotConfig;
pub use parser::{deserialize_csv, deserialize_csv_file};
pub use raw_types::{LinkRecord, NodeRecord, SpotRecord};
