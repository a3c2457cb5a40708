//! ROM library discovery
//!
//! Scans a fixed priority list of directories for recognized ROM files and
//! builds an ordered [`Catalog`]. A missing or unreadable directory simply
//! contributes nothing.

mod scanner;

pub use scanner::{
    DEFAULT_APP_FOLDER, DEFAULT_EXTENSIONS, DEFAULT_STORAGE_ROOT, ScanConfig, scan_all,
    scan_directory,
};

use std::path::{Path, PathBuf};

/// A single loadable ROM found on storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    title: String,
    identifier: String,
    path: PathBuf,
}

impl ContentEntry {
    /// Build an entry for `path` if its extension is in `extensions`
    ///
    /// Extensions are given without the leading dot and compared
    /// case-sensitively.
    #[must_use]
    pub fn from_path(path: PathBuf, extensions: &[String]) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if !extensions.iter().any(|known| known == extension) {
            return None;
        }

        let identifier = path.file_name()?.to_string_lossy().into_owned();
        let title = path.file_stem()?.to_string_lossy().into_owned();

        Some(Self {
            title,
            identifier,
            path,
        })
    }

    /// File name without extension
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File name with extension
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered result of one scan pass
///
/// Entries keep scan order: directory priority first, then the order the
/// filesystem enumerated them in. A rescan builds a new catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ContentEntry>,
    searched: Vec<PathBuf>,
}

impl Catalog {
    /// Create a catalog from already-discovered entries
    #[must_use]
    pub const fn new(entries: Vec<ContentEntry>, searched: Vec<PathBuf>) -> Self {
        Self { entries, searched }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ContentEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Directories this scan pass looked in, in priority order
    #[must_use]
    pub fn searched(&self) -> &[PathBuf] {
        &self.searched
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ContentEntry;
    type IntoIter = std::slice::Iter<'a, ContentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
