// ─── File Cache Record ───
// Freshness record for a previously-resolved archive. Written by the
// startup cache and consumed verbatim here: if the (name, size, mtime)
// triple still matches the file on disk, cached results for it are valid
// without rereading the archive.

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, DiscoveryResult};

/// Signed distance from the epoch in milliseconds, so pre-1970 mtimes stay
/// distinct instead of collapsing to zero.
fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_millis() as i64,
        Err(before) => -(before.duration().as_millis() as i64),
    }
}

/// Fixed binary order: length-prefixed UTF-8 name (u16, big-endian), then
/// size and mtime as big-endian i64. Shared across processes, so the layout
/// never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileCacheKey {
    pub filename: String,
    pub size: i64,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
}

impl FileCacheKey {
    pub fn new(filename: impl Into<String>, size: i64, last_modified: i64) -> Self {
        Self {
            filename: filename.into(),
            size,
            last_modified,
        }
    }

    /// Snapshot the current metadata of `path`.
    pub fn for_path(path: &Path) -> DiscoveryResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| DiscoveryError::io(path, source))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let last_modified = epoch_millis(
            metadata
                .modified()
                .map_err(|source| DiscoveryError::io(path, source))?,
        );
        Ok(Self {
            filename,
            size: metadata.len() as i64,
            last_modified,
        })
    }

    /// Whether the file at `path` still matches this record.
    pub fn is_fresh(&self, path: &Path) -> bool {
        Self::for_path(path).map(|current| current == *self).unwrap_or(false)
    }

    pub fn read(input: &mut impl Read) -> io::Result<Self> {
        let mut len = [0u8; 2];
        input.read_exact(&mut len)?;
        let mut name = vec![0u8; u16::from_be_bytes(len) as usize];
        input.read_exact(&mut name)?;
        let filename = String::from_utf8(name)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut long = [0u8; 8];
        input.read_exact(&mut long)?;
        let size = i64::from_be_bytes(long);
        input.read_exact(&mut long)?;
        let last_modified = i64::from_be_bytes(long);

        Ok(Self {
            filename,
            size,
            last_modified,
        })
    }

    pub fn write(&self, output: &mut impl Write) -> io::Result<()> {
        let name = self.filename.as_bytes();
        let len = u16::try_from(name.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "cache key filename longer than 65535 bytes",
            )
        })?;
        output.write_all(&len.to_be_bytes())?;
        output.write_all(name)?;
        output.write_all(&self.size.to_be_bytes())?;
        output.write_all(&self.last_modified.to_be_bytes())?;
        Ok(())
    }
}
