pub mod cli;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod output;
pub mod rename;
pub mod scanner;
pub mod ui;
pub mod walker;

pub use confirm::{is_confirmed, read_answer};
pub use error::{AppError, ExitCode};
pub use rename::{
    apply_plan, generate_file_name, plan_directory, ApplyError, ApplyReport, RenameEntry,
    RenamePlan,
};
pub use scanner::{
    scan_files, scan_subdirectories, DirectoryEntry, FileEntry, FileFilter, ScannerError,
    TARGET_EXTENSION,
};
pub use walker::{DirectoryOutcome, DirectoryWalker, RunSummary, WalkOptions};
