//! helmpack Installer
//!
//! Fetches a pinned Helm release from the official distribution site and
//! installs the `helm` executable:
//!
//! - **Platform detection**: `linux-amd64` or `linux-arm64`
//! - **Integrity**: the tarball is checked against its published `.sha256`
//! - **Extraction**: only `linux-<arch>/helm` is taken from the archive
//!
//! ## Example
//!
//! ```rust,no_run
//! use helmpack_install::{HelmRelease, Installer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let release = HelmRelease::for_host("v3.14.4")?;
//! let installer = Installer::new("https://get.helm.sh", "/usr/local/bin")?;
//! let helm = installer.install(&release).await?;
//! println!("helm installed at {}", helm.display());
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod error;
pub mod extract;
pub mod http;
pub mod installer;
pub mod platform;
pub mod release;

pub use checksum::{parse_checksum, sha256_hex};
pub use error::{InstallError, Result};
pub use extract::extract_member;
pub use http::HttpClient;
pub use installer::{DEFAULT_BASE_URL, DEFAULT_INSTALL_DIR, Installer};
pub use platform::{Arch, Platform};
pub use release::HelmRelease;
