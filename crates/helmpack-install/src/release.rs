//! Helm release artifacts on the distribution site

use helmpack_core::ensure_v_prefix;

use crate::error::Result;
use crate::platform::Platform;

/// A specific Helm release build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmRelease {
    /// Release tag, always `v`-prefixed
    pub version: String,
    /// Target platform
    pub platform: Platform,
}

impl HelmRelease {
    pub fn new(version: &str, platform: Platform) -> Result<Self> {
        Ok(Self {
            version: ensure_v_prefix(version)?,
            platform,
        })
    }

    /// Release build for the running host
    pub fn for_host(version: &str) -> Result<Self> {
        Self::new(version, Platform::detect()?)
    }

    /// Tarball name, e.g. `helm-v3.14.4-linux-amd64.tar.gz`
    pub fn archive_name(&self) -> String {
        format!("helm-{}-{}.tar.gz", self.version, self.platform)
    }

    /// Path of the executable inside the tarball
    pub fn member_path(&self) -> String {
        format!("{}/helm", self.platform)
    }

    /// Tarball URL under `base_url`
    pub fn archive_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.archive_name())
    }

    /// Checksum URL published next to the tarball
    pub fn checksum_url(&self, base_url: &str) -> String {
        format!("{}.sha256", self.archive_url(base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Arch;

    #[test]
    fn test_release_urls() {
        let release = HelmRelease::new("3.14.4", Platform::linux(Arch::Amd64)).unwrap();

        assert_eq!(release.version, "v3.14.4");
        assert_eq!(release.archive_name(), "helm-v3.14.4-linux-amd64.tar.gz");
        assert_eq!(release.member_path(), "linux-amd64/helm");
        assert_eq!(
            release.archive_url("https://get.helm.sh/"),
            "https://get.helm.sh/helm-v3.14.4-linux-amd64.tar.gz"
        );
        assert_eq!(
            release.checksum_url("https://get.helm.sh"),
            "https://get.helm.sh/helm-v3.14.4-linux-amd64.tar.gz.sha256"
        );
    }

    #[test]
    fn test_release_arm64() {
        let release = HelmRelease::new("v3.15.0", Platform::linux(Arch::Arm64)).unwrap();
        assert_eq!(release.member_path(), "linux-arm64/helm");
    }

    #[test]
    fn test_release_rejects_empty_version() {
        assert!(HelmRelease::new(" ", Platform::linux(Arch::Amd64)).is_err());
    }
}
