//! Action input parsing
//!
//! Inputs arrive as plain strings (GitHub Actions `INPUT_*` variables or
//! command-line flags). These helpers turn them into typed values.

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Interpret a boolean-as-string input
///
/// `1`, `true`, `yes`, `y` and `on` (any case, surrounding whitespace
/// ignored) are true. Everything else, including the empty string, is false.
pub fn truthy(input: &str) -> bool {
    matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// Split the `values_files` input into an ordered list of paths
///
/// Entries may be separated by commas, newlines or carriage returns. Each
/// entry is trimmed and blank entries are dropped; order is kept as given.
pub fn parse_values_files(raw: &str) -> Vec<String> {
    raw.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `package_args` using POSIX shell word rules
///
/// `#` has no special meaning: a word starting with it is an ordinary
/// argument, not the start of a comment.
pub fn split_package_args(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(&escape_comment_marks(raw)).ok_or_else(|| CoreError::InvalidPackageArgs {
        args: raw.to_string(),
    })
}

/// Backslash-escape every `#` that opens an unquoted word
///
/// `shlex` drops such a word and the rest of its line as a comment.
fn escape_comment_marks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut quote: Option<char> = None;
    let mut word_start = true;

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                out.push(c);
                out.extend(chars.next());
                word_start = false;
                continue;
            }
            (None, '\'' | '"') => quote = Some(c),
            (None, '#') if word_start => out.push('\\'),
            _ => {}
        }
        word_start = quote.is_none() && matches!(c, ' ' | '\t' | '\n');
        out.push(c);
    }
    out
}

/// Everything `helm package` needs besides the chart itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Value for `--version`, passed through verbatim
    pub chart_version: String,
    /// Value for `--app-version`
    pub app_version: String,
    /// Absolute destination directory
    pub destination: PathBuf,
    /// Extra arguments appended after the fixed flags
    pub extra_args: Vec<String>,
}

impl PackageRequest {
    /// Arguments for `helm package`, without the binary itself
    pub fn to_args(&self, chart: &std::path::Path) -> Vec<String> {
        let mut args = vec![
            "package".to_string(),
            chart.display().to_string(),
            "--destination".to_string(),
            self.destination.display().to_string(),
            "--version".to_string(),
            self.chart_version.clone(),
            "--app-version".to_string(),
            self.app_version.clone(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Archive path Helm produces when it does not report one
    pub fn expected_archive(&self, chart_name: &str) -> PathBuf {
        self.destination
            .join(format!("{}-{}.tgz", chart_name, self.chart_version))
    }
}
