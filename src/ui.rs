//! Console output for the rename session.
//!
//! Everything the user has to read before answering a prompt goes to stdout.
//! Colors are applied only when stdout is a terminal.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::confirm::CONFIRMATION_WORD;

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
}

impl UiConfig {
    /// Create UI config from the environment
    pub fn new() -> Self {
        Self {
            colors_enabled: should_use_colors(),
        }
    }

    pub fn plain() -> Self {
        Self {
            colors_enabled: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI writing to stdout
    pub fn new(config: UiConfig) -> Self {
        Self::with_writer(config, Box::new(io::stdout()))
    }

    /// Create UI with custom writer
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Header printed before each directory of a recursive run
    pub fn directory_header(&mut self, path: &Path) {
        let _ = writeln!(self.writer);
        let title = format!("Directory: {}", path.display());
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", title.bold());
            let _ = writeln!(self.writer, "{}", "─".repeat(50).dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", title);
            let _ = writeln!(self.writer, "{}", "-".repeat(50));
        }
    }

    /// One line of the plan: `old >>> new`
    pub fn mapping(&mut self, from: &str, to: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {} {}",
                from.dimmed(),
                ">>>".cyan(),
                to.bold()
            );
        } else {
            let _ = writeln!(self.writer, "{} >>> {}", from, to);
        }
    }

    pub fn confirmation_prompt(&mut self) {
        let prompt = format!(
            "Type \"{}\" to accept this file names: ",
            CONFIRMATION_WORD
        );
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", prompt.bold());
        } else {
            let _ = writeln!(self.writer, "{}", prompt);
        }
        let _ = self.writer.flush();
    }

    pub fn renamed(&mut self) {
        self.success("Done! Files renamed successfully!");
    }

    pub fn aborted(&mut self) {
        self.warning("Operation abort!");
    }

    pub fn no_files(&mut self) {
        self.warning("No files to rename!");
    }

    pub fn dry_run_notice(&mut self) {
        self.dim("Dry run: nothing was renamed.");
    }

    /// Print a success message
    pub fn success(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.green().bold());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.yellow());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Last line before the process waits for Enter
    pub fn pause_prompt(&mut self) {
        let _ = writeln!(self.writer);
        self.dim("Press Enter to exit...");
        let _ = self.writer.flush();
    }

    /// Access the underlying writer for block output
    pub fn writer(&mut self) -> &mut dyn Write {
        &mut *self.writer
    }
}
