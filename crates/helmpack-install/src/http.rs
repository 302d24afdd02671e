//! HTTP client for the Helm distribution site

use std::time::Duration;

use crate::error::{InstallError, Result};

/// User agent sent with every request
const USER_AGENT: &str = concat!("helmpack/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over `reqwest::Client` with the installer's defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| InstallError::NetworkError {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Fetch a URL, failing on any non-success status
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Fetch a URL as UTF-8 text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let bytes = self.get_bytes(url).await?;
        String::from_utf8(bytes).map_err(|e| InstallError::NetworkError {
            message: format!("Response from {} is not UTF-8: {}", url, e),
        })
    }
}
