// ─── Content Unit ───
// A logical package formed by overlaying one or more roots (jars or
// exploded directories) with an optional per-entry inclusion rule.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::scan;
use crate::error::DiscoveryResult;

/// Per-entry inclusion predicate. Receives the entry name and the root it is
/// being evaluated against, so a single root set can be partitioned into
/// several disjoint units.
pub type EntryFilter = Box<dyn Fn(&str, &Path) -> bool + Send + Sync>;

/// One logical package over an ordered list of roots.
///
/// For a given entry name the first root that contains it wins, unless the
/// filter excludes that root for that entry, in which case resolution falls
/// through to the next root. Directory entries (names ending in `/`) always
/// pass the filter so the hierarchy stays intact.
pub struct ContentUnit {
    roots: Vec<PathBuf>,
    filter: Option<EntryFilter>,
}

impl ContentUnit {
    /// Single-root unit with no filter.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        ContentUnitBuilder::new().root(root).build()
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Whether the filter admits `entry` when served from `root`.
    pub fn admits(&self, entry: &str, root: &Path) -> bool {
        if entry.ends_with('/') {
            return true;
        }
        match &self.filter {
            Some(filter) => filter(entry, root),
            None => true,
        }
    }

    /// The root that serves `entry`, if any.
    pub fn find(&self, entry: &str) -> DiscoveryResult<Option<&Path>> {
        for root in &self.roots {
            if !self.admits(entry, root) {
                continue;
            }
            if scan::source_contains(root, entry)? {
                return Ok(Some(root));
            }
        }
        Ok(None)
    }

    pub fn contains(&self, entry: &str) -> DiscoveryResult<bool> {
        Ok(self.find(entry)?.is_some())
    }

    /// Read the bytes of `entry` from whichever root serves it.
    pub fn read(&self, entry: &str) -> DiscoveryResult<Option<Vec<u8>>> {
        match self.find(entry)? {
            Some(root) => scan::read_from_source(root, entry),
            None => Ok(None),
        }
    }

    /// Union of all admitted entry names across the roots, deduplicated.
    pub fn entries(&self) -> DiscoveryResult<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for root in &self.roots {
            for entry in scan::enumerate_source(root)? {
                if self.admits(&entry, root) {
                    names.insert(entry);
                }
            }
        }
        Ok(names)
    }
}

impl fmt::Debug for ContentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentUnit")
            .field("roots", &self.roots)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

/// Builder mirroring how units are assembled by locators: roots in shadow
/// order, then an optional filter.
#[derive(Default)]
pub struct ContentUnitBuilder {
    roots: Vec<PathBuf>,
    filter: Option<EntryFilter>,
}

impl ContentUnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        self.roots.extend(roots);
        self
    }

    pub fn filter(mut self, filter: impl Fn(&str, &Path) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn build(self) -> ContentUnit {
        ContentUnit {
            roots: self.roots,
            filter: self.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn first_root_wins_for_shared_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jar");
        let b = dir.path().join("b.jar");
        write_jar(&a, &[("shared.txt", b"from a"), ("only-a.txt", b"a")]);
        write_jar(&b, &[("shared.txt", b"from b"), ("only-b.txt", b"b")]);

        let unit = ContentUnitBuilder::new().root(&a).root(&b).build();
        assert_eq!(unit.read("shared.txt").unwrap().unwrap(), b"from a");
        assert_eq!(unit.read("only-b.txt").unwrap().unwrap(), b"b");
        assert_eq!(unit.read("missing.txt").unwrap(), None);
    }

    #[test]
    fn filter_exclusion_falls_through_to_later_roots() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jar");
        let b = dir.path().join("b.jar");
        write_jar(&a, &[("shared.txt", b"from a")]);
        write_jar(&b, &[("shared.txt", b"from b")]);

        let skip_a = a.clone();
        let unit = ContentUnitBuilder::new()
            .root(&a)
            .root(&b)
            .filter(move |_, root| root != skip_a)
            .build();
        assert_eq!(unit.read("shared.txt").unwrap().unwrap(), b"from b");
    }

    #[test]
    fn predicate_partition_assigns_each_entry_to_its_root() {
        let dir = tempfile::tempdir().unwrap();
        let code = dir.path().join("code");
        let data = dir.path().join("data");
        fs::create_dir_all(code.join("pkg")).unwrap();
        fs::create_dir_all(data.join("assets")).unwrap();
        fs::write(code.join("pkg/Thing.class"), b"code").unwrap();
        fs::write(data.join("assets/icon.png"), b"data").unwrap();

        let code_root = code.clone();
        let unit = ContentUnitBuilder::new()
            .root(&code)
            .root(&data)
            .filter(move |entry, root| {
                if root == code_root {
                    entry.ends_with(".class")
                } else {
                    !entry.ends_with(".class")
                }
            })
            .build();

        assert_eq!(unit.find("pkg/Thing.class").unwrap(), Some(code.as_path()));
        assert_eq!(unit.find("assets/icon.png").unwrap(), Some(data.as_path()));
    }

    #[test]
    fn directory_entries_bypass_the_filter() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/file.txt"), b"x").unwrap();

        let unit = ContentUnitBuilder::new()
            .root(&root)
            .filter(|_, _| false)
            .build();
        let entries = unit.entries().unwrap();
        assert!(entries.contains("sub/"));
        assert!(!entries.contains("sub/file.txt"));
    }

    #[test]
    fn entries_unions_roots_and_applies_filter_per_root() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jar");
        let b = dir.path().join("b.jar");
        write_jar(&a, &[("kept.txt", b"1"), ("dropped.txt", b"2")]);
        write_jar(&b, &[("dropped.txt", b"3")]);

        let a_root = a.clone();
        let unit = ContentUnitBuilder::new()
            .root(&a)
            .root(&b)
            .filter(move |entry, root| root != a_root || entry != "dropped.txt")
            .build();

        let entries = unit.entries().unwrap();
        assert!(entries.contains("kept.txt"));
        // Excluded from a, but b still serves it.
        assert!(entries.contains("dropped.txt"));
        assert_eq!(unit.read("dropped.txt").unwrap().unwrap(), b"3");
    }
}
