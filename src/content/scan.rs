// ─── Source Scanning ───
// Shared helpers for inspecting a single content root, which is either a
// jar file or an exploded directory. Handles are opened and closed within
// each call; nothing here keeps a file open across operations.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{DiscoveryError, DiscoveryResult};

fn open_archive(root: &Path) -> DiscoveryResult<zip::ZipArchive<File>> {
    let file = File::open(root).map_err(|source| DiscoveryError::io(root, source))?;
    zip::ZipArchive::new(file).map_err(|source| DiscoveryError::UnreadableArchive {
        path: root.to_path_buf(),
        source,
    })
}

/// Whether `root` contains the named entry. Missing roots count as empty.
pub fn source_contains(root: &Path, entry: &str) -> DiscoveryResult<bool> {
    if root.is_dir() {
        return Ok(root.join(entry).exists());
    }
    if !root.is_file() {
        return Ok(false);
    }
    let archive = open_archive(root)?;
    let found = archive.file_names().any(|name| name == entry);
    Ok(found)
}

/// Read a single entry out of `root`. `Ok(None)` when the entry is absent.
pub fn read_from_source(root: &Path, entry: &str) -> DiscoveryResult<Option<Vec<u8>>> {
    if root.is_dir() {
        let path = root.join(entry);
        if !path.is_file() {
            return Ok(None);
        }
        return std::fs::read(&path)
            .map(Some)
            .map_err(|source| DiscoveryError::io(path, source));
    }
    if !root.is_file() {
        return Ok(None);
    }

    let mut archive = open_archive(root)?;
    let mut file = match archive.by_name(entry) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(source) => {
            return Err(DiscoveryError::UnreadableArchive {
                path: root.to_path_buf(),
                source,
            })
        }
    };
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)
        .map_err(|source| DiscoveryError::io(root, source))?;
    Ok(Some(buf))
}

/// Enumerate every entry name in `root`, using `/` separators and a trailing
/// `/` for directory entries, matching jar naming.
pub fn enumerate_source(root: &Path) -> DiscoveryResult<Vec<String>> {
    if root.is_dir() {
        let mut names = Vec::new();
        for item in WalkDir::new(root).min_depth(1) {
            let item = item.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(source) => DiscoveryError::io(path, source),
                    None => DiscoveryError::InvalidLayout(format!(
                        "directory cycle under {root:?}"
                    )),
                }
            })?;
            let Ok(relative) = item.path().strip_prefix(root) else {
                continue;
            };
            let mut name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if item.file_type().is_dir() {
                name.push('/');
            }
            names.push(name);
        }
        return Ok(names);
    }
    if !root.is_file() {
        return Ok(Vec::new());
    }
    let archive = open_archive(root)?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// First source on the search path that contains `entry`.
///
/// Scan faults (e.g. a corrupt jar somewhere on the path) are logged and
/// skipped; a broken unrelated source must not hide the one we want.
pub fn find_source_containing(sources: &[PathBuf], entry: &str) -> Option<PathBuf> {
    for source in sources {
        match source_contains(source, entry) {
            Ok(true) => return Some(source.clone()),
            Ok(false) => {}
            Err(e) => warn!("Skipping unreadable search path entry {source:?}: {e}"),
        }
    }
    None
}
