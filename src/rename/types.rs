use std::path::{Path, PathBuf};

use crate::scanner::FileEntry;

use super::name_builder::generate_file_name;

/// A single planned rename inside one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    /// Full path to the file as it was enumerated
    pub source_path: PathBuf,
    /// Original file name
    pub source_name: String,
    /// Full path after the rename, in the same directory
    pub destination_path: PathBuf,
    /// New sequential file name
    pub destination_name: String,
}

impl RenameEntry {
    pub fn new(source_path: PathBuf, destination_name: String) -> Self {
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination_path = source_path
            .parent()
            .map(|p| p.join(&destination_name))
            .unwrap_or_else(|| PathBuf::from(&destination_name));

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
        }
    }

    /// True when the file already carries its target name
    pub fn is_in_place(&self) -> bool {
        self.source_path == self.destination_path
    }
}

/// Ordered rename plan for one directory. Entry `i` maps to
/// `generate_file_name(i)`.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub entries: Vec<RenameEntry>,
}

impl RenamePlan {
    /// Build a plan from files already sorted in the order they should be
    /// numbered.
    pub fn from_entries(directory: &Path, files: &[FileEntry]) -> Self {
        let entries = files
            .iter()
            .enumerate()
            .map(|(i, file)| RenameEntry::new(file.path.clone(), generate_file_name(i)))
            .collect();

        Self {
            directory: directory.to_path_buf(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries that actually need a filesystem rename
    pub fn pending(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|e| !e.is_in_place())
    }
}

/// What `apply_plan` did to a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Files moved to their new name
    pub renamed: usize,
    /// Files that already had their target name
    pub unchanged: usize,
    /// Whether files went through staging names first
    pub staged: bool,
}
