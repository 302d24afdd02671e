//! The packaging pipeline
//!
//! Stages run strictly in order and the first failure stops the run:
//! load chart, install Helm, merge values, update dependencies, package,
//! emit the output. The output is only written once an archive exists.

use helmpack_core::{
    ChartDir, PackageRequest, StagedChart, Values, resolve_path, workspace_relpath, write_output,
};
use helmpack_install::{HelmRelease, InstallError, Installer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{HelmSource, Settings};
use crate::display;
use crate::error::{CliError, Result};
use crate::helm::{Helm, HelmError, saved_path};

/// Name of the step output carrying the archive path
pub const OUTPUT_NAME: &str = "package_path";

/// Run every stage, returning the workspace-relative archive path
pub async fn run(settings: &Settings) -> Result<PathBuf> {
    let chart = load_chart(&settings.chart_path)?;

    fs::create_dir_all(&settings.package.destination).map_err(|e| {
        CliError::package(format!(
            "cannot create destination {}: {}",
            settings.package.destination.display(),
            e
        ))
    })?;

    let helm = install_helm(&settings.helm).await?;

    // Kept alive until packaging is done; dropping it removes the copy.
    let staged = merge_values(settings, &chart)?;
    let chart = staged.as_ref().map_or(&chart, |s| &s.chart);

    if settings.dependency_update {
        update_dependencies(&helm, chart).await?;
    } else {
        display::skipped("Dependencies", "not updated (dependency_update is false)");
    }

    let archive = package(&helm, chart, &settings.package, &settings.workspace).await?;
    emit(settings, &archive)
}

fn load_chart(path: &Path) -> Result<ChartDir> {
    let chart = ChartDir::load(path).map_err(CliError::input)?;
    tracing::debug!(
        name = chart.name(),
        dependencies = chart.metadata.dependencies.len(),
        "loaded chart"
    );
    Ok(chart)
}

async fn install_helm(source: &HelmSource) -> Result<Helm> {
    let bin = match source {
        HelmSource::Existing(path) => {
            display::stage("Using", format!("helm at {}", path.display()));
            path.clone()
        }
        HelmSource::Download {
            version,
            base_url,
            install_dir,
        } => {
            let release = HelmRelease::for_host(version).map_err(|e| match e {
                InstallError::UnsupportedArch { .. } => CliError::install_with_help(
                    e,
                    "set HELM_BIN to a helm executable that is already installed",
                ),
                other => CliError::install(other),
            })?;
            display::stage(
                "Installing",
                format!("Helm {} ({})", release.version, release.platform),
            );

            let installer =
                Installer::new(base_url.as_str(), install_dir.as_path()).map_err(CliError::install)?;
            installer.install(&release).await.map_err(CliError::install)?
        }
    };

    let helm = Helm::new(bin);
    let version = helm
        .version()
        .await
        .map_err(|e| CliError::install(format!("Helm installed but failed to run:\n{}", e)))?;
    tracing::debug!(bin = %helm.bin().display(), "helm ready");
    display::success("Helm", version);

    Ok(helm)
}

fn merge_values(settings: &Settings, chart: &ChartDir) -> Result<Option<StagedChart>> {
    if settings.values_files.is_empty() {
        display::skipped("Values", "no values files given, using the chart's values.yaml");
        return Ok(None);
    }

    display::stage(
        "Merging",
        format!("values files: {}", settings.values_files.join(", ")),
    );
    let merged = Values::merge_files(&chart.root, &settings.values_files).map_err(CliError::values)?;

    let staged = chart
        .stage_in(&settings.workspace)
        .map_err(CliError::values)?;
    merged
        .write_to(staged.chart.values_path())
        .map_err(CliError::values)?;

    Ok(Some(staged))
}

async fn update_dependencies(helm: &Helm, chart: &ChartDir) -> Result<()> {
    display::stage("Updating", format!("dependencies of {}", chart.name()));
    helm.dependency_update(&chart.root)
        .await
        .map_err(|e| CliError::DependencyUpdate {
            output: match e {
                HelmError::Failed { output, .. } => output,
                other => other.to_string(),
            },
        })?;
    Ok(())
}

async fn package(
    helm: &Helm,
    chart: &ChartDir,
    request: &PackageRequest,
    workspace: &Path,
) -> Result<PathBuf> {
    display::stage(
        "Packaging",
        format!("{} v{}", chart.name(), request.chart_version),
    );
    let output = helm
        .package(&chart.root, request)
        .await
        .map_err(|e| match e {
            HelmError::Failed { output, .. } => CliError::package(output),
            other => CliError::package(other),
        })?;

    let archive = match saved_path(&output) {
        Some(path) => resolve_path(workspace, &path),
        None => {
            let expected = request.expected_archive(chart.name());
            tracing::warn!(
                "helm did not report the archive path, assuming {}",
                expected.display()
            );
            expected
        }
    };

    if !archive.is_file() {
        return Err(CliError::package(format!(
            "Could not find created package at {}.\nOutput:\n{}",
            archive.display(),
            output
        )));
    }

    display::success("Created", archive.display());
    Ok(archive)
}

fn emit(settings: &Settings, archive: &Path) -> Result<PathBuf> {
    let relative = workspace_relpath(&settings.workspace, archive);
    write_output(
        &settings.output,
        OUTPUT_NAME,
        &relative.display().to_string(),
    )
    .map_err(CliError::output)?;
    Ok(relative)
}
