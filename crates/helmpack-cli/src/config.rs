//! Invocation settings
//!
//! Every input can be given as a flag or through the environment the
//! GitHub Actions runner provides (`INPUT_<NAME>`, `GITHUB_*`). Values are
//! kept as strings while parsing because the runner exports unset inputs as
//! empty variables; emptiness is treated as absence here.

use clap::Parser;
use helmpack_core::{
    CoreError, OutputTarget, PackageRequest, normalize, parse_values_files, resolve_helm_version,
    resolve_path, split_package_args, truthy, validate_chart_version,
};
use helmpack_install::{DEFAULT_BASE_URL, DEFAULT_INSTALL_DIR};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Workspace root inside the GitHub Actions container
pub const DEFAULT_WORKSPACE: &str = "/github/workspace";

#[derive(Parser, Debug)]
#[command(name = "helmpack")]
#[command(author = "helmpack Contributors")]
#[command(version)]
#[command(about = "Install Helm, merge values files and package a chart", long_about = None)]
pub struct Cli {
    /// Chart directory, relative to the workspace
    #[arg(long, env = "INPUT_CHART_PATH")]
    pub chart_path: Option<String>,

    /// Directory the archive is written to
    #[arg(long, env = "INPUT_DESTINATION")]
    pub destination: Option<String>,

    /// Helm release to install
    #[arg(long, env = "INPUT_HELM_VERSION")]
    pub helm_version: Option<String>,

    /// Run `helm dependency update` before packaging (true/false)
    #[arg(long, env = "INPUT_DEPENDENCY_UPDATE")]
    pub dependency_update: Option<String>,

    /// Chart version passed to `--version`
    #[arg(long, env = "INPUT_HELM_CHART_VERSION")]
    pub helm_chart_version: Option<String>,

    /// App version passed to `--app-version`
    #[arg(long, env = "INPUT_HELM_CHART_APP_VERSION")]
    pub helm_chart_app_version: Option<String>,

    /// Values files to merge, comma or newline separated, relative to the chart
    #[arg(long, env = "INPUT_VALUES_FILES")]
    pub values_files: Option<String>,

    /// Extra arguments appended to `helm package`
    #[arg(long, env = "INPUT_PACKAGE_ARGS", allow_hyphen_values = true)]
    pub package_args: Option<String>,

    /// Repository checkout the inputs are relative to
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<String>,

    /// File step outputs are appended to (stdout when unset)
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<String>,

    /// Directory the helm executable is installed into
    #[arg(long, env = "HELM_INSTALL_DIR")]
    pub install_dir: Option<String>,

    /// Base URL of the Helm release archives
    #[arg(long, env = "HELM_DOWNLOAD_BASE_URL")]
    pub download_base_url: Option<String>,

    /// Use an existing helm executable instead of downloading one
    #[arg(long, env = "HELM_BIN")]
    pub helm_bin: Option<String>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// How Helm is made available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelmSource {
    /// Download `version` from `base_url` into `install_dir`
    Download {
        version: String,
        base_url: String,
        install_dir: PathBuf,
    },
    /// Use a binary that is already present
    Existing(PathBuf),
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub workspace: PathBuf,
    pub chart_path: PathBuf,
    pub values_files: Vec<String>,
    pub dependency_update: bool,
    pub package: PackageRequest,
    pub helm: HelmSource,
    pub output: OutputTarget,
}

impl Settings {
    /// Validate inputs and resolve paths
    ///
    /// Nothing here touches the network; a bad input fails before Helm is
    /// downloaded.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let workspace = normalize(Path::new(
            &non_empty(cli.workspace).unwrap_or_else(|| DEFAULT_WORKSPACE.to_string()),
        ));

        let chart_path = required(cli.chart_path, "chart_path")?;
        let chart_version = required(cli.helm_chart_version, "helm_chart_version")?;
        let app_version = required(cli.helm_chart_app_version, "helm_chart_app_version")?;

        validate_chart_version(&chart_version).map_err(CliError::input)?;

        let destination = non_empty(cli.destination).unwrap_or_else(|| ".".to_string());
        let extra_args = split_package_args(cli.package_args.as_deref().unwrap_or_default())
            .map_err(CliError::input)?;

        let helm = match non_empty(cli.helm_bin) {
            Some(bin) => HelmSource::Existing(PathBuf::from(bin)),
            None => HelmSource::Download {
                version: resolve_helm_version(cli.helm_version.as_deref()),
                base_url: non_empty(cli.download_base_url)
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                install_dir: PathBuf::from(
                    non_empty(cli.install_dir).unwrap_or_else(|| DEFAULT_INSTALL_DIR.to_string()),
                ),
            },
        };

        Ok(Self {
            chart_path: resolve_path(&workspace, Path::new(chart_path.trim())),
            values_files: parse_values_files(cli.values_files.as_deref().unwrap_or_default()),
            dependency_update: truthy(cli.dependency_update.as_deref().unwrap_or("false")),
            package: PackageRequest {
                chart_version: chart_version.trim().to_string(),
                app_version,
                destination: resolve_path(&workspace, Path::new(destination.trim())),
                extra_args,
            },
            helm,
            output: OutputTarget::from_env_value(non_empty(cli.github_output).map(PathBuf::from)),
            workspace,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| {
        let env = format!("INPUT_{}", name.to_ascii_uppercase());
        let help = format!("pass --{} or set {}", name.replace('_', "-"), env);
        CliError::input_with_help(
            CoreError::MissingInput {
                name: name.to_string(),
                env,
            },
            help,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["helmpack"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn base_args() -> Vec<&'static str> {
        vec![
            "--workspace",
            "/ws",
            "--chart-path",
            "charts/app",
            "--helm-chart-version",
            "1.2.3",
            "--helm-chart-app-version",
            "4.5.6",
        ]
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_cli(cli(&base_args())).unwrap();

        assert_eq!(settings.chart_path, Path::new("/ws/charts/app"));
        assert_eq!(settings.package.destination, Path::new("/ws"));
        assert_eq!(settings.package.chart_version, "1.2.3");
        assert_eq!(settings.package.app_version, "4.5.6");
        assert!(settings.package.extra_args.is_empty());
        assert!(settings.values_files.is_empty());
        assert!(!settings.dependency_update);
        assert_eq!(
            settings.helm,
            HelmSource::Download {
                version: "v3.14.4".to_string(),
                base_url: "https://get.helm.sh".to_string(),
                install_dir: PathBuf::from("/usr/local/bin"),
            }
        );
    }

    #[test]
    fn test_explicit_inputs() {
        let mut args = base_args();
        args.extend([
            "--destination",
            "dist",
            "--helm-version",
            "3.15.0",
            "--dependency-update",
            "TRUE",
            "--values-files",
            "values.yaml,values-prod.yaml",
            "--package-args",
            "--debug --sign",
            "--github-output",
            "/tmp/out",
        ]);

        let settings = Settings::from_cli(cli(&args)).unwrap();

        assert_eq!(settings.package.destination, Path::new("/ws/dist"));
        assert!(settings.dependency_update);
        assert_eq!(settings.values_files, vec!["values.yaml", "values-prod.yaml"]);
        assert_eq!(settings.package.extra_args, vec!["--debug", "--sign"]);
        assert_eq!(settings.output, OutputTarget::File(PathBuf::from("/tmp/out")));
        assert!(matches!(
            settings.helm,
            HelmSource::Download { ref version, .. } if version == "v3.15.0"
        ));
    }

    #[test]
    fn test_existing_helm_binary() {
        let mut args = base_args();
        args.extend(["--helm-bin", "/opt/helm/helm"]);

        let settings = Settings::from_cli(cli(&args)).unwrap();

        assert_eq!(settings.helm, HelmSource::Existing(PathBuf::from("/opt/helm/helm")));
    }

    #[test]
    fn test_missing_required_input() {
        let err = Settings::from_cli(cli(&["--chart-path", "chart", "--helm-chart-version", "1.0.0"]))
            .unwrap_err();

        assert_eq!(err.exit_code(), crate::exit_codes::INPUT_ERROR);
        assert!(err.to_string().contains("helm_chart_app_version"));
    }

    #[test]
    fn test_blank_required_input_counts_as_missing() {
        let err = Settings::from_cli(cli(&[
            "--chart-path",
            "  ",
            "--helm-chart-version",
            "1.0.0",
            "--helm-chart-app-version",
            "1.0.0",
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("chart_path"));
    }

    #[test]
    fn test_invalid_chart_version() {
        let mut args = base_args();
        args[5] = "1.2";

        let err = Settings::from_cli(cli(&args)).unwrap_err();

        assert_eq!(err.exit_code(), crate::exit_codes::INPUT_ERROR);
        assert!(err.to_string().contains("SemVer"));
    }

    #[test]
    fn test_unbalanced_package_args() {
        let mut args = base_args();
        args.extend(["--package-args", "--key 'oops"]);

        let err = Settings::from_cli(cli(&args)).unwrap_err();

        assert_eq!(err.exit_code(), crate::exit_codes::INPUT_ERROR);
    }
}
