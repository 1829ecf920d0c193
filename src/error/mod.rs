mod codes;

pub use codes::ExitCode;

use crate::rename::ApplyError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid directory path!")]
    InvalidArgument,

    #[error("Directory not exists!")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Target name already in use: {}", .path.display())]
    RenameConflict { path: PathBuf },

    #[error("Rename failed: {from} -> {to}")]
    RenameError {
        from: String,
        to: String,
        completed: Vec<(String, String)>,
        staged: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::InvalidArgument => ExitCode::InvalidArguments,
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::RenameConflict { .. } => ExitCode::RenameError,
            AppError::RenameError { .. } => ExitCode::RenameError,
            AppError::Input(_) => ExitCode::GeneralError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Whether the error only concerns the directory being renamed, so a
    /// recursive run can move on to the next one.
    pub fn is_directory_scoped(&self) -> bool {
        matches!(
            self,
            AppError::RenameConflict { .. }
                | AppError::RenameError { .. }
                | AppError::PermissionDenied { .. }
        )
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InvalidArgument => "Invalid directory path!\n\n\
                 Usage: chapter-renamer [OPTIONS] <TARGET_DIR>"
                .to_string(),

            AppError::DirectoryNotFound { path } => {
                format!(
                    "Directory not exists!\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::RenameConflict { path } => {
                format!(
                    "Cannot rename, the target name is already in use:\n  {}\n\n\
                     No files in this directory were renamed.",
                    path.display()
                )
            }

            AppError::RenameError {
                from,
                to,
                completed,
                staged,
                source,
            } => {
                let mut msg = format!(
                    "Failed to rename file:\n\
                     From:  {}\n\
                     To:    {}\n\
                     Error: {}\n",
                    from, to, source
                );

                if completed.is_empty() {
                    msg.push_str("\nNo files were renamed before the failure.\n");
                } else {
                    msg.push_str(&format!(
                        "\n{} file(s) were already renamed:\n",
                        completed.len()
                    ));
                    for (old, new) in completed {
                        msg.push_str(&format!("  {} >>> {}\n", old, new));
                    }
                }

                if !staged.is_empty() {
                    msg.push_str("\nFiles left under a temporary name:\n");
                    for path in staged {
                        msg.push_str(&format!("  {}\n", path.display()));
                    }
                }

                msg.push_str("\nCheck file permissions and ensure no files are open.");
                msg
            }

            AppError::Input(source) => format!("Failed to read input: {}", source),

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<ApplyError> for AppError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Conflict { path } => AppError::RenameConflict { path },
            ApplyError::RenameFailed {
                from,
                to,
                completed,
                staged,
                source,
            } => AppError::RenameError {
                from,
                to,
                completed: completed
                    .into_iter()
                    .map(|e| (e.source_name, e.destination_name))
                    .collect(),
                staged,
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::InvalidArgument.exit_code(), ExitCode::InvalidArguments);

        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::DirectoryNotFound);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);

        let err = AppError::RenameConflict {
            path: PathBuf::from("/test/001.mp3"),
        };
        assert_eq!(err.exit_code(), ExitCode::RenameError);
    }

    #[test]
    fn test_display_matches_console_wording() {
        assert_eq!(AppError::InvalidArgument.to_string(), "Invalid directory path!");
        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "Directory not exists!");
    }

    #[test]
    fn test_rename_error_lists_completed_entries() {
        let err = AppError::RenameError {
            from: "b.mp3".to_string(),
            to: "002.mp3".to_string(),
            completed: vec![("a.mp3".to_string(), "001.mp3".to_string())],
            staged: vec![PathBuf::from("/book/.003.mp3.chapter-renamer.tmp")],
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("a.mp3 >>> 001.mp3"));
        assert!(msg.contains("1 file(s) were already renamed"));
        assert!(msg.contains(".003.mp3.chapter-renamer.tmp"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_directory_scope() {
        let err = AppError::RenameConflict {
            path: PathBuf::from("/book/001.mp3"),
        };
        assert!(err.is_directory_scoped());
        assert!(!AppError::InvalidArgument.is_directory_scoped());
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::DirectoryNotFound);
    }

    #[test]
    fn test_apply_error_conversion() {
        let apply_err = ApplyError::Conflict {
            path: PathBuf::from("/book/001.mp3"),
        };
        let app_err: AppError = apply_err.into();
        assert!(matches!(app_err, AppError::RenameConflict { .. }));
    }
}
