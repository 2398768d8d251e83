use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] flowfinder_core::Error),
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("spot-route needs exactly one of --from-node and --from-spot")]
    MissingOrigin,
    #[error("Invalid log filter: {0}")]
    LogFilter(String),
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}
