//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Missing required input: {name} (env {env})")]
    MissingInput { name: String, env: String },

    #[error("Invalid helm chart version (SemVer required): {version}")]
    InvalidChartVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("helm_version is empty")]
    EmptyHelmVersion,

    #[error("`Chart.yaml` not found at: {}", path.display())]
    ChartNotFound { path: PathBuf },

    #[error("Invalid Chart.yaml at {}: {source}", path.display())]
    InvalidChart {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Values file not found: {}", path.display())]
    ValuesFileNotFound { path: PathBuf },

    #[error("Failed to parse values file {}: {message}", path.display())]
    ValuesParse { path: PathBuf, message: String },

    #[error("Values file {} must contain a mapping at the top level", path.display())]
    ValuesNotMapping { path: PathBuf },

    #[error("Invalid package_args (unbalanced quotes?): {args}")]
    InvalidPackageArgs { args: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to walk chart directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
