use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{ApplyReport, RenameEntry, RenamePlan};

const STAGING_SUFFIX: &str = "chapter-renamer.tmp";

#[derive(Error, Debug)]
pub enum ApplyError {
    /// A target name is taken by a file the plan does not move away.
    /// Raised before anything is renamed.
    #[error("Target already exists: {}", .path.display())]
    Conflict { path: PathBuf },

    /// A rename failed part way through. `completed` lists the entries that
    /// already have their new name; `staged` lists files left under a
    /// temporary name.
    #[error("Rename failed: {from} -> {to}")]
    RenameFailed {
        from: String,
        to: String,
        completed: Vec<RenameEntry>,
        staged: Vec<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn staging_path(entry: &RenameEntry) -> PathBuf {
    let name = format!(".{}.{}", entry.destination_name, STAGING_SUFFIX);
    entry
        .destination_path
        .parent()
        .map(|p| p.join(&name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Rename every entry of `plan` in index order.
///
/// Files already carrying their target name are left alone, so applying the
/// same plan twice is a no-op. When a target is currently held by another
/// file of the plan (`001.mp3` -> `002.mp3` while `002.mp3` is also being
/// renamed), all files are first moved to staging names and then to their
/// targets. A failure while staging puts the staged files back; once files
/// start reaching their final names, renames that succeeded are kept.
pub fn apply_plan(plan: &RenamePlan) -> Result<ApplyReport, ApplyError> {
    let pending: Vec<&RenameEntry> = plan.pending().collect();
    let unchanged = plan.len() - pending.len();

    let sources: HashSet<&Path> = pending.iter().map(|e| e.source_path.as_path()).collect();

    let staged = pending
        .iter()
        .any(|e| sources.contains(e.destination_path.as_path()));

    check_conflicts(&pending, &sources, staged)?;

    if staged {
        debug!(directory = ?plan.directory, "Targets overlap sources, renaming through staging names");
        apply_staged(&pending)?;
    } else {
        apply_direct(&pending)?;
    }

    Ok(ApplyReport {
        renamed: pending.len(),
        unchanged,
        staged,
    })
}

fn check_conflicts(
    pending: &[&RenameEntry],
    sources: &HashSet<&Path>,
    staged: bool,
) -> Result<(), ApplyError> {
    for entry in pending {
        let target = entry.destination_path.as_path();
        if target.exists() && !sources.contains(target) {
            warn!(path = ?target, "Target name already taken");
            return Err(ApplyError::Conflict {
                path: target.to_path_buf(),
            });
        }

        if staged {
            let staging = staging_path(entry);
            if staging.exists() {
                warn!(path = ?staging, "Staging name already taken");
                return Err(ApplyError::Conflict { path: staging });
            }
        }
    }
    Ok(())
}

fn apply_direct(pending: &[&RenameEntry]) -> Result<(), ApplyError> {
    let mut completed = Vec::with_capacity(pending.len());

    for entry in pending {
        fs::rename(&entry.source_path, &entry.destination_path).map_err(|e| {
            ApplyError::RenameFailed {
                from: entry.source_name.clone(),
                to: entry.destination_name.clone(),
                completed: completed.clone(),
                staged: Vec::new(),
                source: e,
            }
        })?;

        info!("Renamed: {} -> {}", entry.source_name, entry.destination_name);
        completed.push((*entry).clone());
    }

    Ok(())
}

fn apply_staged(pending: &[&RenameEntry]) -> Result<(), ApplyError> {
    let staged = stage_all(pending)?;
    promote_staged(pending, &staged)
}

/// Move every source to its staging name. If one move fails, the files
/// already staged are moved back to their original names; only those that
/// could not be restored are reported as staged.
fn stage_all(pending: &[&RenameEntry]) -> Result<Vec<PathBuf>, ApplyError> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(pending.len());

    for entry in pending {
        let staging = staging_path(entry);
        if let Err(e) = fs::rename(&entry.source_path, &staging) {
            let unrestored = restore_staged(&pending[..staged.len()], &staged);
            return Err(ApplyError::RenameFailed {
                from: entry.source_name.clone(),
                to: entry.destination_name.clone(),
                completed: Vec::new(),
                staged: unrestored,
                source: e,
            });
        }

        debug!(from = %entry.source_name, staging = ?staging, "Staged");
        staged.push(staging);
    }

    Ok(staged)
}

fn restore_staged(entries: &[&RenameEntry], staged: &[PathBuf]) -> Vec<PathBuf> {
    let mut unrestored = Vec::new();

    for (entry, staging) in entries.iter().zip(staged).rev() {
        match fs::rename(staging, &entry.source_path) {
            Ok(()) => debug!(name = %entry.source_name, "Restored from staging"),
            Err(e) => {
                warn!(staging = ?staging, error = %e, "Could not restore staged file");
                unrestored.push(staging.clone());
            }
        }
    }

    unrestored.reverse();
    unrestored
}

/// Move staged files to their final names, in index order.
fn promote_staged(pending: &[&RenameEntry], staged: &[PathBuf]) -> Result<(), ApplyError> {
    let mut completed = Vec::with_capacity(pending.len());

    for (i, entry) in pending.iter().enumerate() {
        fs::rename(&staged[i], &entry.destination_path).map_err(|e| {
            ApplyError::RenameFailed {
                from: entry.source_name.clone(),
                to: entry.destination_name.clone(),
                completed: completed.clone(),
                staged: staged[i..].to_vec(),
                source: e,
            }
        })?;

        info!("Renamed: {} -> {}", entry.source_name, entry.destination_name);
        completed.push((*entry).clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::plan_directory;
    use crate::scanner::FileFilter;
    use tempfile::tempdir;

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_apply_renames_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), "second").unwrap();
        fs::write(dir.path().join("a.mp3"), "first").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        let report = apply_plan(&plan).unwrap();

        assert_eq!(report.renamed, 2);
        assert_eq!(report.unchanged, 0);
        assert!(!report.staged);
        assert_eq!(listing(dir.path()), vec!["001.mp3", "002.mp3", "notes.txt"]);
        assert_eq!(fs::read_to_string(dir.path().join("001.mp3")).unwrap(), "first");
        assert_eq!(fs::read_to_string(dir.path().join("002.mp3")).unwrap(), "second");
    }

    #[test]
    fn test_reapplying_is_a_no_op() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("intro.mp3"), "").unwrap();
        fs::write(dir.path().join("outro.mp3"), "").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        apply_plan(&plan).unwrap();

        let second = plan_directory(dir.path(), FileFilter::default()).unwrap();
        let report = apply_plan(&second).unwrap();

        assert_eq!(report.renamed, 0);
        assert_eq!(report.unchanged, 2);
        assert_eq!(listing(dir.path()), vec!["001.mp3", "002.mp3"]);
    }

    #[test]
    fn test_shifted_numbering_goes_through_staging() {
        let dir = tempdir().unwrap();
        // "000.mp3" sorts first, pushing 001 -> 002 and 002 -> 003
        fs::write(dir.path().join("000.mp3"), "zero").unwrap();
        fs::write(dir.path().join("001.mp3"), "one").unwrap();
        fs::write(dir.path().join("002.mp3"), "two").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        let report = apply_plan(&plan).unwrap();

        assert!(report.staged);
        assert_eq!(report.renamed, 3);
        assert_eq!(listing(dir.path()), vec!["001.mp3", "002.mp3", "003.mp3"]);
        assert_eq!(fs::read_to_string(dir.path().join("001.mp3")).unwrap(), "zero");
        assert_eq!(fs::read_to_string(dir.path().join("002.mp3")).unwrap(), "one");
        assert_eq!(fs::read_to_string(dir.path().join("003.mp3")).unwrap(), "two");
    }

    #[test]
    fn test_conflict_with_file_outside_plan() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), "").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        // Appears after planning, outside the plan
        fs::create_dir(dir.path().join("001.mp3")).unwrap();

        let result = apply_plan(&plan);

        assert!(matches!(result, Err(ApplyError::Conflict { .. })));
        assert!(dir.path().join("a.mp3").exists());
    }

    #[test]
    fn test_failure_reports_completed_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), "").unwrap();
        fs::write(dir.path().join("b.mp3"), "").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        fs::remove_file(dir.path().join("b.mp3")).unwrap();

        match apply_plan(&plan) {
            Err(ApplyError::RenameFailed {
                from,
                to,
                completed,
                staged,
                ..
            }) => {
                assert_eq!(from, "b.mp3");
                assert_eq!(to, "002.mp3");
                assert_eq!(completed.len(), 1);
                assert_eq!(completed[0].destination_name, "001.mp3");
                assert!(staged.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(dir.path().join("001.mp3").exists());
    }

    #[test]
    fn test_staging_failure_restores_original_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("000.mp3"), "zero").unwrap();
        fs::write(dir.path().join("001.mp3"), "one").unwrap();
        fs::write(dir.path().join("002.mp3"), "two").unwrap();

        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();
        fs::remove_file(dir.path().join("002.mp3")).unwrap();

        match apply_plan(&plan) {
            Err(ApplyError::RenameFailed {
                from,
                completed,
                staged,
                ..
            }) => {
                assert_eq!(from, "002.mp3");
                assert!(completed.is_empty());
                assert!(staged.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(listing(dir.path()), vec!["000.mp3", "001.mp3"]);
        assert_eq!(fs::read_to_string(dir.path().join("000.mp3")).unwrap(), "zero");
        assert_eq!(fs::read_to_string(dir.path().join("001.mp3")).unwrap(), "one");
    }

    #[test]
    fn test_promotion_failure_keeps_finished_renames() {
        let dir = tempdir().unwrap();
        let first = RenameEntry::new(dir.path().join("a.mp3"), "001.mp3".to_string());
        let second = RenameEntry::new(dir.path().join("b.mp3"), "002.mp3".to_string());
        let staged = vec![staging_path(&first), staging_path(&second)];
        fs::write(&staged[0], "a").unwrap();
        fs::write(&staged[1], "b").unwrap();
        // A non-empty directory cannot be replaced by a file
        fs::create_dir(dir.path().join("002.mp3")).unwrap();
        fs::write(dir.path().join("002.mp3").join("keep"), "").unwrap();

        let result = promote_staged(&[&first, &second], &staged);

        match result {
            Err(ApplyError::RenameFailed {
                to,
                completed,
                staged: left,
                ..
            }) => {
                assert_eq!(to, "002.mp3");
                assert_eq!(completed, vec![first.clone()]);
                assert_eq!(left, vec![staged[1].clone()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(fs::read_to_string(dir.path().join("001.mp3")).unwrap(), "a");
        assert!(staged[1].exists());
    }

    #[test]
    fn test_empty_plan_applies_nothing() {
        let dir = tempdir().unwrap();
        let plan = plan_directory(dir.path(), FileFilter::default()).unwrap();

        let report = apply_plan(&plan).unwrap();

        assert_eq!(report, ApplyReport::default());
    }
}
