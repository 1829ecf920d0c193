use std::path::Path;

use tracing::debug;

use crate::scanner::{scan_files, FileFilter, ScannerError};

use super::types::RenamePlan;

/// Compute the rename plan for the immediate files of `directory`.
///
/// Reads the directory but never modifies it.
pub fn plan_directory(directory: &Path, filter: FileFilter) -> Result<RenamePlan, ScannerError> {
    let files = scan_files(directory, filter)?;
    let plan = RenamePlan::from_entries(directory, &files);

    debug!(
        directory = ?directory,
        entries = plan.len(),
        pending = plan.pending().count(),
        "Plan computed"
    );

    Ok(plan)
}
