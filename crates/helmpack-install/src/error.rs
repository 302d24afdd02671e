//! Error types for installation

use thiserror::Error;

/// Installation errors
#[derive(Debug, Error)]
pub enum InstallError {
    // ============ Platform Errors ============
    #[error("Unsupported CPU architecture for Helm binary: {arch}")]
    UnsupportedArch { arch: String },

    // ============ Network Errors ============
    #[error("HTTP error: {status} fetching {url}")]
    HttpError { status: u16, url: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Invalid download URL: {url}")]
    InvalidUrl { url: String },

    // ============ Integrity Errors ============
    #[error("Empty sha256 file")]
    EmptyChecksum,

    #[error("Invalid sha256 content: {content}")]
    InvalidChecksum { content: String },

    #[error("Helm tarball sha256 mismatch. expected={expected} actual={actual} url={url}")]
    ChecksumMismatch {
        expected: String,
        actual: String,
        url: String,
    },

    // ============ Archive Errors ============
    #[error("Helm archive missing {member}")]
    MissingMember { member: String },

    // ============ Input Errors ============
    #[error(transparent)]
    Core(#[from] helmpack_core::CoreError),

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for installation
pub type Result<T> = std::result::Result<T, InstallError>;

impl From<reqwest::Error> for InstallError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if let Some(status) = e.status() {
            InstallError::HttpError {
                status: status.as_u16(),
                url,
            }
        } else if e.is_builder() {
            InstallError::InvalidUrl { url }
        } else if e.is_connect() {
            InstallError::NetworkError {
                message: format!("Connection failed: {}", e),
            }
        } else {
            InstallError::NetworkError {
                message: e.to_string(),
            }
        }
    }
}

impl From<tempfile::PersistError> for InstallError {
    fn from(e: tempfile::PersistError) -> Self {
        InstallError::Io(e.error)
    }
}
