use std::io::Read;

use log::info;

use super::config::SnapshotConfig;
use super::parser::{deserialize_csv, deserialize_csv_file};
use super::raw_types::{LinkRecord, NodeRecord, SpotRecord};
use crate::{Error, MapLink, MapNode, PointOfInterest, VenueSnapshot};

/// Loads and validates a venue snapshot from the configured CSV tables
///
/// # Errors
///
/// Returns an error if a table is missing or malformed, or if the records
/// fail integrity validation.
pub fn load_snapshot(config: &SnapshotConfig) -> Result<VenueSnapshot, Error> {
    validate_config(config)?;

    info!("Reading nodes from {}", config.nodes_path.display());
    let nodes = deserialize_csv_file::<NodeRecord>(&config.nodes_path)?;

    info!("Reading links from {}", config.links_path.display());
    let links = deserialize_csv_file::<LinkRecord>(&config.links_path)?;

    let spots = match &config.spots_path {
        Some(path) => {
            info!("Reading points of interest from {}", path.display());
            deserialize_csv_file::<SpotRecord>(path)?
        }
        None => Vec::new(),
    };

    assemble(nodes, links, spots)
}

/// Same as [`load_snapshot`] for tables that are not files
pub fn snapshot_from_readers<N, L, S>(
    nodes: N,
    links: L,
    spots: Option<S>,
) -> Result<VenueSnapshot, Error>
where
    N: Read,
    L: Read,
    S: Read,
{
    let nodes = deserialize_csv::<NodeRecord, _>(nodes)?;
    let links = deserialize_csv::<LinkRecord, _>(links)?;
    let spots = match spots {
        Some(reader) => deserialize_csv::<SpotRecord, _>(reader)?,
        None => Vec::new(),
    };
    assemble(nodes, links, spots)
}

fn assemble(
    nodes: Vec<NodeRecord>,
    links: Vec<LinkRecord>,
    spots: Vec<SpotRecord>,
) -> Result<VenueSnapshot, Error> {
    let snapshot = VenueSnapshot::new(
        nodes.into_iter().map(MapNode::from).collect(),
        links.into_iter().map(MapLink::from).collect(),
        spots.into_iter().map(PointOfInterest::from).collect(),
    )?;

    info!(
        "Venue snapshot loaded: {} nodes, {} links, {} points of interest",
        snapshot.nodes().len(),
        snapshot.links().len(),
        snapshot.spots().len()
    );
    Ok(snapshot)
}

fn validate_config(config: &SnapshotConfig) -> Result<(), Error> {
    let tables = [&config.nodes_path, &config.links_path]
        .into_iter()
        .chain(config.spots_path.as_ref());
    for path in tables {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Table not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}
