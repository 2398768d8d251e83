use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Locations of the venue tables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    pub nodes_path: PathBuf,
    pub links_path: PathBuf,
    /// Without a spot table the venue has no points of interest
    #[serde(default)]
    pub spots_path: Option<PathBuf>,
}

impl SnapshotConfig {
    /// `nodes.csv`, `links.csv` and, if present, `spots.csv` inside `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let spots_path = dir.join("spots.csv");
        Self {
            nodes_path: dir.join("nodes.csv"),
            links_path: dir.join("links.csv"),
            spots_path: spots_path.exists().then_some(spots_path),
        }
    }
}
