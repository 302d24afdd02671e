//! helmpack Core - inputs, chart handling and values merging for helmpack
//!
//! This crate provides the pieces of the packaging pipeline that do not
//! talk to the network or to the `helm` binary:
//! - `version`: Helm release selection and chart version validation
//! - `inputs`: action input parsing (`values_files`, `package_args`, booleans)
//! - `paths`: workspace-relative path resolution
//! - `chart`: `Chart.yaml` loading and chart staging
//! - `values`: deep merge of values overlays
//! - `output`: action output emission
//! - `yaml`: YAML 1.1 loading of values documents

pub mod chart;
pub mod error;
pub mod inputs;
pub mod output;
pub mod paths;
pub mod values;
pub mod version;
pub mod yaml;

pub use chart::{ChartDependency, ChartDir, ChartMetadata, StagedChart};
pub use error::{CoreError, Result};
pub use inputs::{PackageRequest, parse_values_files, split_package_args, truthy};
pub use output::{OutputTarget, write_output};
pub use paths::{normalize, resolve_path, workspace_relpath};
pub use values::Values;
pub use version::{DEFAULT_HELM_VERSION, ensure_v_prefix, resolve_helm_version, validate_chart_version};
