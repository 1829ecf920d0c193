use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::confirm::{is_confirmed, read_answer};
use crate::error::AppError;
use crate::rename::{apply_plan, plan_directory, ApplyReport};
use crate::scanner::{scan_subdirectories, FileFilter};
use crate::ui::Ui;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Also process the immediate subdirectories of the root
    pub recursive: bool,
    pub filter: FileFilter,
    /// Print plans without prompting or renaming
    pub dry_run: bool,
}

/// How a single directory ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Renamed(ApplyReport),
    Aborted,
    Empty,
    /// Dry run: number of files that would be renamed
    Planned(usize),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub directories: Vec<(PathBuf, DirectoryOutcome)>,
}

impl RunSummary {
    fn record(&mut self, path: &Path, outcome: DirectoryOutcome) {
        self.directories.push((path.to_path_buf(), outcome));
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, DirectoryOutcome::Failed(_)))
    }

    pub fn aborted_count(&self) -> usize {
        self.count(|o| matches!(o, DirectoryOutcome::Aborted))
    }

    pub fn empty_count(&self) -> usize {
        self.count(|o| matches!(o, DirectoryOutcome::Empty))
    }

    pub fn renamed_files(&self) -> usize {
        self.directories
            .iter()
            .map(|(_, o)| match o {
                DirectoryOutcome::Renamed(report) => report.renamed,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&DirectoryOutcome) -> bool) -> usize {
        self.directories.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Runs plan, confirm and apply over the root directory and, when
/// recursive, over each of its immediate subdirectories.
pub struct DirectoryWalker<'a, R: BufRead> {
    options: WalkOptions,
    input: &'a mut R,
    ui: &'a mut Ui,
}

impl<'a, R: BufRead> DirectoryWalker<'a, R> {
    pub fn new(options: WalkOptions, input: &'a mut R, ui: &'a mut Ui) -> Self {
        Self { options, input, ui }
    }

    pub fn walk(&mut self, root: &Path) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();

        if !self.options.recursive {
            let outcome = self.process_directory(root)?;
            summary.record(root, outcome);
            return Ok(summary);
        }

        // Validates the root before anything is printed
        let subdirectories = scan_subdirectories(root)?;
        debug!(count = subdirectories.len(), "Subdirectories to process");

        let outcome = self.process_or_record(root, false)?;
        summary.record(root, outcome);

        for subdirectory in &subdirectories {
            let outcome = self.process_or_record(&subdirectory.path, true)?;
            summary.record(&subdirectory.path, outcome);
        }

        Ok(summary)
    }

    /// Errors that only affect `directory` become a `Failed` outcome so
    /// the remaining directories still get their turn. For a subdirectory
    /// every error except a broken input counts, since the root was already
    /// listed successfully.
    fn process_or_record(
        &mut self,
        directory: &Path,
        subdirectory: bool,
    ) -> Result<DirectoryOutcome, AppError> {
        match self.process_directory(directory) {
            Ok(outcome) => Ok(outcome),
            Err(e)
                if e.is_directory_scoped()
                    || (subdirectory && !matches!(e, AppError::Input(_))) =>
            {
                debug!(directory = ?directory, error = %e, "Directory failed");
                self.ui.error(&e.detailed_message());
                Ok(DirectoryOutcome::Failed(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn process_directory(&mut self, directory: &Path) -> Result<DirectoryOutcome, AppError> {
        if self.options.recursive {
            self.ui.directory_header(directory);
        }

        let plan = plan_directory(directory, self.options.filter)?;

        if plan.is_empty() {
            info!(directory = ?directory, "No files to rename");
            self.ui.no_files();
            return Ok(DirectoryOutcome::Empty);
        }

        for entry in &plan.entries {
            self.ui.mapping(&entry.source_name, &entry.destination_name);
        }

        if self.options.dry_run {
            self.ui.dry_run_notice();
            return Ok(DirectoryOutcome::Planned(plan.len()));
        }

        self.ui.confirmation_prompt();
        let answer = read_answer(&mut *self.input).map_err(AppError::Input)?;

        if !answer.as_deref().map(is_confirmed).unwrap_or(false) {
            info!(directory = ?directory, "Plan declined");
            self.ui.aborted();
            return Ok(DirectoryOutcome::Aborted);
        }

        let report = apply_plan(&plan)?;
        info!(
            directory = ?directory,
            renamed = report.renamed,
            unchanged = report.unchanged,
            "Plan applied"
        );
        self.ui.renamed();

        Ok(DirectoryOutcome::Renamed(report))
    }
}
