//! Release tarball extraction

use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use std::path::Path;
use tar::Archive;

use crate::error::{InstallError, Result};

/// Read a single file out of a gzip'd tarball held in memory
pub fn extract_member(data: &[u8], member: &str) -> Result<Vec<u8>> {
    let gz = GzDecoder::new(Cursor::new(data));
    let mut archive = Archive::new(gz);
    let wanted = Path::new(member);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let path = path.strip_prefix("./").unwrap_or(&path);

        if path == wanted && entry.header().entry_type().is_file() {
            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut contents)?;
            return Ok(contents);
        }
    }

    Err(InstallError::MissingMember {
        member: member.to_string(),
    })
}
