//! Directory scanning

use super::{Catalog, ContentEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Removable-volume root that is always scanned
pub const DEFAULT_STORAGE_ROOT: &str = "E:\\";

/// Application folder looked up under each scan root
pub const DEFAULT_APP_FOLDER: &str = "PANDA3DS";

/// Recognized ROM extensions, without the dot
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["3ds", "cci"];

/// Inputs to a scan pass
///
/// The scan result depends only on these values and the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Fixed storage root, scanned on every pass
    pub storage_root: PathBuf,
    /// Folder name looked up under the storage root and the local-state directory
    pub app_folder: String,
    /// Application local-state directory, if one is configured
    pub local_state_dir: Option<PathBuf>,
    /// Accepted file extensions (case-sensitive, no leading dot)
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            app_folder: DEFAULT_APP_FOLDER.to_string(),
            local_state_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ScanConfig {
    /// Set the local-state directory
    #[must_use]
    pub fn with_local_state(mut self, dir: Option<PathBuf>) -> Self {
        self.local_state_dir = dir;
        self
    }

    /// Directories to scan, in priority order
    ///
    /// The local-state pair is omitted when no local-state directory is set.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![
            self.storage_root.clone(),
            self.storage_root.join(&self.app_folder),
        ];

        if let Some(local_state) = &self.local_state_dir {
            dirs.push(local_state.clone());
            dirs.push(local_state.join(&self.app_folder));
        }

        dirs
    }
}

/// Scan every configured directory and build a catalog
///
/// Results are concatenated in directory priority order with no
/// de-duplication, so the same file name in two directories yields two
/// entries.
#[must_use]
pub fn scan_all(config: &ScanConfig) -> Catalog {
    let searched = config.directories();
    let entries: Vec<ContentEntry> = searched
        .iter()
        .flat_map(|dir| scan_directory(dir, &config.extensions))
        .collect();

    info!(
        entries = entries.len(),
        directories = searched.len(),
        "library scan finished"
    );
    Catalog::new(entries, searched)
}

/// Collect recognized regular files directly inside `dir`
///
/// A directory that is missing, not a directory, or unreadable contributes
/// nothing. Entries that fail to stat are skipped individually. Symlinks are
/// not followed.
#[must_use]
pub fn scan_directory(dir: &Path, extensions: &[String]) -> Vec<ContentEntry> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping scan directory");
            return Vec::new();
        }
    };

    let found: Vec<ContentEntry> = read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| ContentEntry::from_path(entry.path(), extensions))
        .collect();

    debug!(dir = %dir.display(), entries = found.len(), "scanned directory");
    found
}
