//! Helm release selection and chart version validation

use semver::Version;

use crate::error::{CoreError, Result};

/// Helm release installed when no `helm_version` input is given
pub const DEFAULT_HELM_VERSION: &str = "v3.14.4";

/// Pick the Helm release tag to install
///
/// Absent or blank input falls back to [`DEFAULT_HELM_VERSION`]. Release
/// tags on get.helm.sh always carry a `v` prefix, so one is added when
/// missing. Nothing else is checked: an unknown release shows up as a
/// download failure.
pub fn resolve_helm_version(input: Option<&str>) -> String {
    match input.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => with_v_prefix(v),
        None => DEFAULT_HELM_VERSION.to_string(),
    }
}

/// Add the `v` prefix Helm uses for release tags
pub fn ensure_v_prefix(version: &str) -> Result<String> {
    let v = version.trim();
    if v.is_empty() {
        return Err(CoreError::EmptyHelmVersion);
    }
    Ok(with_v_prefix(v))
}

fn with_v_prefix(v: &str) -> String {
    if v.starts_with('v') {
        v.to_string()
    } else {
        format!("v{}", v)
    }
}

/// Validate a chart version as strict SemVer 2.0
///
/// Helm refuses to package charts whose version is not SemVer, so this is
/// checked up front, before anything is downloaded.
pub fn validate_chart_version(version: &str) -> Result<Version> {
    Version::parse(version.trim()).map_err(|source| CoreError::InvalidChartVersion {
        version: version.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_when_absent() {
        assert_eq!(resolve_helm_version(None), "v3.14.4");
        assert_eq!(resolve_helm_version(Some("")), "v3.14.4");
        assert_eq!(resolve_helm_version(Some("   ")), "v3.14.4");
    }

    #[test]
    fn test_resolve_explicit_version() {
        assert_eq!(resolve_helm_version(Some("v3.15.0")), "v3.15.0");
        assert_eq!(resolve_helm_version(Some(" 3.12.1 ")), "v3.12.1");
    }

    #[test]
    fn test_ensure_v_prefix() {
        assert_eq!(ensure_v_prefix("v3.14.4").unwrap(), "v3.14.4");
        assert_eq!(ensure_v_prefix("3.14.4").unwrap(), "v3.14.4");
        assert!(matches!(ensure_v_prefix("  "), Err(CoreError::EmptyHelmVersion)));
    }

    #[test]
    fn test_validate_chart_version_accepts_semver() {
        for v in ["1.2.3", "0.0.0", "1.2.3-alpha.1", "1.2.3+build.5", "1.2.3-alpha.1+build.5"] {
            assert!(validate_chart_version(v).is_ok(), "{v} should be valid");
        }
    }

    #[test]
    fn test_validate_chart_version_rejects_non_semver() {
        for v in ["", "1.2", "01.2.3", "1.02.3", "1.2.03", "latest"] {
            assert!(validate_chart_version(v).is_err(), "{v} should be rejected");
        }
    }
}
