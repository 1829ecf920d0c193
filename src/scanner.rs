use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Extension every chapter file is expected to carry.
pub const TARGET_EXTENSION: &str = "mp3";

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Which files of a directory take part in a rename pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// Every regular file.
    All,
    /// Files whose extension matches, ignoring ASCII case.
    Extension(&'static str),
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter::Extension(TARGET_EXTENSION)
    }
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Extension(wanted) => path
                .extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
                .unwrap_or(false),
        }
    }
}

/// A file found directly inside the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

fn open_directory(target: &Path) -> Result<ReadDir, ScannerError> {
    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })
}

fn entry_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

/// List the immediate files of `target` accepted by `filter`, sorted by name
/// using ordinal comparison.
pub fn scan_files(target: &Path, filter: FileFilter) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?target, ?filter, "Scanning files");

    let mut entries = Vec::new();

    for entry in open_directory(target)? {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if !path.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        if !filter.matches(&path) {
            trace!(path = ?path, "Skipping filtered file");
            continue;
        }

        let Some(name) = entry_name(&path) else {
            continue;
        };

        entries.push(FileEntry::new(name, path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "File scan complete");

    Ok(entries)
}

/// List the immediate subdirectories of `target`, sorted by name.
pub fn scan_subdirectories(target: &Path) -> Result<Vec<DirectoryEntry>, ScannerError> {
    debug!(path = ?target, "Scanning subdirectories");

    let mut entries = Vec::new();

    for entry in open_directory(target)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            trace!(path = ?path, "Skipping non-directory");
            continue;
        }

        let Some(name) = entry_name(&path) else {
            continue;
        };

        debug!(name = %name, "Found subdirectory");
        entries.push(DirectoryEntry::new(name, path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = entries.len(), "Subdirectory scan complete");

    Ok(entries)
}
