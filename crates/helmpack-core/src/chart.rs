//! Chart descriptor loading and staging

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{CoreError, Result};
use crate::paths::normalize;

/// Prefix of the ephemeral directories charts are staged into
pub const STAGING_PREFIX: &str = ".dist-temporary-";

/// The parts of `Chart.yaml` helmpack cares about
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    /// API version (v1 or v2)
    #[serde(default)]
    pub api_version: Option<String>,

    /// Chart name, used for the archive file name
    pub name: String,

    /// Version declared in the chart (overridden at packaging time)
    #[serde(default)]
    pub version: Option<String>,

    /// Declared sub-chart dependencies
    #[serde(default)]
    pub dependencies: Vec<ChartDependency>,
}

/// A sub-chart dependency entry
#[derive(Debug, Clone, Deserialize)]
pub struct ChartDependency {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
}

/// A chart directory with its parsed descriptor
#[derive(Debug, Clone)]
pub struct ChartDir {
    /// Chart root directory
    pub root: PathBuf,
    /// Parsed `Chart.yaml`
    pub metadata: ChartMetadata,
}

impl ChartDir {
    /// Load a chart from a directory
    ///
    /// Fails when `Chart.yaml` is missing or does not parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let chart_yaml = root.join("Chart.yaml");

        if !chart_yaml.is_file() {
            return Err(CoreError::ChartNotFound { path: chart_yaml });
        }

        let content = fs::read_to_string(&chart_yaml)?;
        let metadata: ChartMetadata =
            serde_yaml::from_str(&content).map_err(|source| CoreError::InvalidChart {
                path: chart_yaml.clone(),
                source,
            })?;

        Ok(Self { root, metadata })
    }

    /// Chart name from `Chart.yaml`
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Path of the chart's default values document
    pub fn values_path(&self) -> PathBuf {
        self.root.join("values.yaml")
    }

    /// Copy the chart into a fresh `.dist-temporary-*` directory under `parent`
    ///
    /// The copy keeps the chart's directory name. The staging directory is
    /// removed when the returned [`StagedChart`] is dropped. When `parent`
    /// lies inside the chart, the staging directory itself is not copied.
    pub fn stage_in(&self, parent: &Path) -> Result<StagedChart> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)?;

        let dir_name = self
            .root
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| self.metadata.name.clone().into());
        let target = dir.path().join(dir_name);

        copy_tree(&self.root, &target, &normalize(dir.path()))?;
        tracing::debug!(from = %self.root.display(), to = %target.display(), "staged chart");

        Ok(StagedChart {
            chart: ChartDir {
                root: target,
                metadata: self.metadata.clone(),
            },
            _dir: dir,
        })
    }
}

/// A chart copy living in an ephemeral directory
#[derive(Debug)]
pub struct StagedChart {
    /// The staged chart
    pub chart: ChartDir,
    _dir: TempDir,
}

/// Recursively copy a directory, following symlinks, leaving out `skip`
fn copy_tree(src: &Path, dst: &Path, skip: &Path) -> Result<()> {
    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| normalize(e.path()).as_path() != skip);

    for entry in walker {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_chart(dir: &Path) {
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::write(
            dir.join("Chart.yaml"),
            "apiVersion: v2\nname: mychart\nversion: 0.1.0\ndependencies:\n  - name: redis\n    version: 18.x\n    repository: https://charts.example.com\n",
        )
        .unwrap();
        fs::write(dir.join("values.yaml"), "replicas: 1\n").unwrap();
        fs::write(dir.join("templates/deployment.yaml"), "kind: Deployment\n").unwrap();
    }

    #[test]
    fn test_load_chart() {
        let temp = TempDir::new().unwrap();
        write_chart(temp.path());

        let chart = ChartDir::load(temp.path()).unwrap();

        assert_eq!(chart.name(), "mychart");
        assert_eq!(chart.metadata.api_version.as_deref(), Some("v2"));
        assert_eq!(chart.metadata.dependencies.len(), 1);
        assert_eq!(chart.metadata.dependencies[0].name, "redis");
    }

    #[test]
    fn test_load_missing_chart_yaml() {
        let temp = TempDir::new().unwrap();

        let err = ChartDir::load(temp.path().join("nope")).unwrap_err();

        assert!(matches!(err, CoreError::ChartNotFound { .. }));
        assert!(err.to_string().contains("Chart.yaml"));
    }

    #[test]
    fn test_load_invalid_chart_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Chart.yaml"), "version: 1.0.0\n").unwrap();

        let err = ChartDir::load(temp.path()).unwrap_err();

        assert!(matches!(err, CoreError::InvalidChart { .. }));
    }

    #[test]
    fn test_stage_copies_tree_and_cleans_up() {
        let workspace = TempDir::new().unwrap();
        let chart_root = workspace.path().join("charts/mychart");
        write_chart(&chart_root);
        let chart = ChartDir::load(&chart_root).unwrap();

        let staged = chart.stage_in(workspace.path()).unwrap();
        let staged_root = staged.chart.root.clone();

        assert!(staged_root.ends_with("mychart"));
        let staging_dir = staged_root.parent().unwrap().to_path_buf();
        assert!(
            staging_dir
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(STAGING_PREFIX)
        );
        assert_eq!(
            fs::read_to_string(staged_root.join("templates/deployment.yaml")).unwrap(),
            "kind: Deployment\n"
        );
        assert_eq!(staged.chart.name(), "mychart");

        drop(staged);
        assert!(!staging_dir.exists());
        assert!(chart_root.join("values.yaml").exists());
    }

    #[test]
    fn test_stage_chart_at_workspace_root() {
        let workspace = TempDir::new().unwrap();
        write_chart(workspace.path());
        let chart = ChartDir::load(workspace.path()).unwrap();

        let staged = chart.stage_in(workspace.path()).unwrap();

        let staged_root = &staged.chart.root;
        assert!(staged_root.join("Chart.yaml").is_file());
        assert!(staged_root.join("templates/deployment.yaml").is_file());
        let nested: Vec<_> = fs::read_dir(staged_root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with(STAGING_PREFIX))
            .collect();
        assert!(nested.is_empty(), "staging dir copied into itself: {:?}", nested);
    }
}
