//! Helm binary installation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::checksum::{parse_checksum, verify};
use crate::error::Result;
use crate::extract::extract_member;
use crate::http::HttpClient;
use crate::release::HelmRelease;

/// Official Helm distribution site
pub const DEFAULT_BASE_URL: &str = "https://get.helm.sh";

/// Where the `helm` executable is placed by default
pub const DEFAULT_INSTALL_DIR: &str = "/usr/local/bin";

/// Downloads, verifies and installs Helm releases
#[derive(Debug, Clone)]
pub struct Installer {
    client: HttpClient,
    base_url: String,
    install_dir: PathBuf,
}

impl Installer {
    pub fn new(base_url: impl Into<String>, install_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: base_url.into(),
            install_dir: install_dir.into(),
        })
    }

    /// Final location of the executable
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join("helm")
    }

    /// Install a release, returning the path of the `helm` executable
    ///
    /// The tarball is verified against its `.sha256` before anything is
    /// written to the install directory.
    pub async fn install(&self, release: &HelmRelease) -> Result<PathBuf> {
        let archive_url = release.archive_url(&self.base_url);
        let checksum_url = release.checksum_url(&self.base_url);

        tracing::info!(
            version = %release.version,
            platform = %release.platform,
            "downloading Helm"
        );
        let archive = self.client.get_bytes(&archive_url).await?;
        let checksum = self.client.get_text(&checksum_url).await?;

        let expected = parse_checksum(&checksum)?;
        verify(&archive, &expected, &archive_url)?;
        tracing::debug!(sha256 = %expected, "checksum verified");

        tracing::info!("extracting Helm");
        let binary = extract_member(&archive, &release.member_path())?;

        let dest = self.binary_path();
        write_executable(&self.install_dir, &dest, &binary)?;
        tracing::info!(path = %dest.display(), "installed Helm");

        Ok(dest)
    }
}

/// Atomically place an executable at `dest`
fn write_executable(dir: &Path, dest: &Path, contents: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o755))?;
    }

    tmp.persist(dest)?;
    Ok(())
}
