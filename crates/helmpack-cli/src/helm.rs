//! Runner for the `helm` executable

use helmpack_core::PackageRequest;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tokio::process::Command;

/// Matches the archive path in `helm package` output
static SAVED_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)saved it to:\s*(.+?)\s*$").expect("valid regex")
});

#[derive(Debug, Error)]
pub enum HelmError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit; `output` is stdout followed by stderr, untouched
    #[error("`{command}` exited with an error:\n{output}")]
    Failed { command: String, output: String },
}

/// A `helm` binary at a known location
#[derive(Debug, Clone)]
pub struct Helm {
    bin: PathBuf,
}

impl Helm {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// `helm version --short`
    pub async fn version(&self) -> Result<String, HelmError> {
        let output = self.run(&["version".to_string(), "--short".to_string()]).await?;
        Ok(output.trim().to_string())
    }

    /// `helm dependency update <chart>`
    pub async fn dependency_update(&self, chart: &Path) -> Result<String, HelmError> {
        self.run(&[
            "dependency".to_string(),
            "update".to_string(),
            chart.display().to_string(),
        ])
        .await
    }

    /// `helm package <chart> ...`, returning the tool's output
    pub async fn package(&self, chart: &Path, request: &PackageRequest) -> Result<String, HelmError> {
        self.run(&request.to_args(chart)).await
    }

    /// Shell-quoted command line, for logs
    pub fn command_line(&self, args: &[String]) -> String {
        let bin = self.bin.display().to_string();
        let words = std::iter::once(bin.as_str()).chain(args.iter().map(String::as_str));
        shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }

    async fn run(&self, args: &[String]) -> Result<String, HelmError> {
        let command = self.command_line(args);
        tracing::info!("Running: {}", command);

        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .await
            .map_err(|source| HelmError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(HelmError::Failed {
                command,
                output: text,
            });
        }

        tracing::debug!(output = %text.trim_end(), "helm finished");
        Ok(text)
    }
}

/// Archive path reported by `helm package`, if any
pub fn saved_path(output: &str) -> Option<PathBuf> {
    SAVED_TO
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| PathBuf::from(m.as_str()))
}
