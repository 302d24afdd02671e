//! Action outputs
//!
//! GitHub Actions collects step outputs from the file named by
//! `GITHUB_OUTPUT`, one `name=value` line per output. Outside of Actions
//! the line goes to stdout instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Where step outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append to the `GITHUB_OUTPUT` file
    File(PathBuf),
    /// Print to standard output (local runs)
    Stdout,
}

impl OutputTarget {
    /// Pick the target from an optional `GITHUB_OUTPUT` value
    ///
    /// An unset or empty value falls back to stdout.
    pub fn from_env_value(value: Option<PathBuf>) -> Self {
        match value {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path),
            _ => Self::Stdout,
        }
    }
}

/// Emit a single `name=value` output
pub fn write_output(target: &OutputTarget, name: &str, value: &str) -> Result<()> {
    match target {
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}={}", name, value)?;
        }
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}={}", name, value)?;
        }
    }
    tracing::debug!(name, value, "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_env_value() {
        assert_eq!(OutputTarget::from_env_value(None), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_env_value(Some(PathBuf::new())),
            OutputTarget::Stdout
        );
        assert_eq!(
            OutputTarget::from_env_value(Some(PathBuf::from("/tmp/out"))),
            OutputTarget::File(PathBuf::from("/tmp/out"))
        );
    }

    #[test]
    fn test_write_output_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        std::fs::write(&path, "previous=1\n").unwrap();
        let target = OutputTarget::File(path.clone());

        write_output(&target, "package_path", "dist/mychart-1.2.3.tgz").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "previous=1\npackage_path=dist/mychart-1.2.3.tgz\n"
        );
    }
}
