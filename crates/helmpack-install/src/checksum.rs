//! SHA-256 checksum handling for release tarballs

use sha2::{Digest, Sha256};

use crate::error::{InstallError, Result};

/// Compute the lowercase hex SHA-256 of data
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Extract the digest from a `.sha256` file
///
/// Helm publishes either `<hash>` or `<hash>  <filename>`. The first token
/// must be 64 hex digits; it is returned lowercased.
pub fn parse_checksum(content: &str) -> Result<String> {
    let text = content.trim();
    let token = text.split_whitespace().next().ok_or(InstallError::EmptyChecksum)?;

    if token.len() != 64 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InstallError::InvalidChecksum {
            content: text.chars().take(120).collect(),
        });
    }

    Ok(token.to_ascii_lowercase())
}

/// Verify data against an expected digest
pub fn verify(data: &[u8], expected: &str, url: &str) -> Result<()> {
    let actual = sha256_hex(data);
    if actual != expected {
        return Err(InstallError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
            url: url.to_string(),
        });
    }
    Ok(())
}
