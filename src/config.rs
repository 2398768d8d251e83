//! `flowfinder.toml` and its command-line overrides

use std::path::{Path, PathBuf};

use flowfinder_core::{RoutingConfig, SnapshotConfig};
use serde::Deserialize;

use crate::cli::GlobalArgs;
use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "flowfinder.toml";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data: Option<SnapshotConfig>,
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Parses a config file; relative table paths are taken from its directory
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;

        if let (Some(data), Some(base)) = (config.data.as_mut(), path.parent()) {
            data.nodes_path = base.join(&data.nodes_path);
            data.links_path = base.join(&data.links_path);
            data.spots_path = data.spots_path.as_ref().map(|p| base.join(p));
        }
        Ok(config)
    }

    /// Explicit `--config`, else `./flowfinder.toml` if it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(dir) = &args.data_dir {
            self.data = Some(SnapshotConfig::from_dir(dir));
        }
        if let Some(penalty) = args.congestion_penalty {
            self.routing.congestion_penalty = penalty;
        }
        self
    }

    /// Table locations, falling back to `./data`
    pub fn snapshot_config(&self) -> SnapshotConfig {
        self.data
            .clone()
            .unwrap_or_else(|| SnapshotConfig::from_dir(PathBuf::from(DEFAULT_DATA_DIR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GlobalArgs {
        GlobalArgs {
            config: None,
            data_dir: None,
            congestion_penalty: None,
            log_level: None,
        }
    }

    #[test]
    fn resolves_tables_next_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowfinder.toml");
        std::fs::write(
            &path,
            r#"
[data]
nodes_path = "tables/nodes.csv"
links_path = "tables/links.csv"

[routing]
congestion_penalty = 0.8
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        let data = config.snapshot_config();
        assert_eq!(data.nodes_path, dir.path().join("tables/nodes.csv"));
        assert_eq!(data.spots_path, None);
        assert_eq!(config.routing.congestion_penalty, 0.8);
        assert_eq!(config.routing.walking_speed, 5.0);
    }

    #[test]
    fn flags_override_file() {
        let config = AppConfig::default().with_overrides(&GlobalArgs {
            data_dir: Some(PathBuf::from("elsewhere")),
            congestion_penalty: Some(1.25),
            ..args()
        });
        assert_eq!(
            config.snapshot_config().links_path,
            PathBuf::from("elsewhere/links.csv")
        );
        assert_eq!(config.routing.congestion_penalty, 1.25);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[routing]\npenalty = 1.0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(CliError::ParseConfig { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            AppConfig::discover(Some(Path::new("/nonexistent/flowfinder.toml"))),
            Err(CliError::ReadConfig { .. })
        ));
    }
}
