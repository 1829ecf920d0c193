use crate::walker::{DirectoryOutcome, RunSummary};
use std::io::{self, Write};

fn describe(outcome: &DirectoryOutcome) -> String {
    match outcome {
        DirectoryOutcome::Renamed(report) if report.unchanged > 0 => format!(
            "{} renamed, {} already in place",
            report.renamed, report.unchanged
        ),
        DirectoryOutcome::Renamed(report) => format!("{} renamed", report.renamed),
        DirectoryOutcome::Aborted => "aborted".to_string(),
        DirectoryOutcome::Empty => "no files".to_string(),
        DirectoryOutcome::Planned(count) => format!("{} would be renamed", count),
        DirectoryOutcome::Failed(reason) => format!("FAILED: {}", reason),
    }
}

/// Display the per-directory results of a recursive run
pub fn display_summary<W: Write + ?Sized>(summary: &RunSummary, writer: &mut W) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              SUMMARY")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;

    for (path, outcome) in &summary.directories {
        writeln!(writer, "  {}", path.display())?;
        writeln!(writer, "     {}", describe(outcome))?;
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Directories:   {}", summary.directories.len())?;
    writeln!(writer, "Files renamed: {}", summary.renamed_files())?;

    let aborted = summary.aborted_count();
    if aborted > 0 {
        writeln!(writer, "  {} directories aborted", aborted)?;
    }

    let empty = summary.empty_count();
    if empty > 0 {
        writeln!(writer, "  {} directories without files", empty)?;
    }

    let failed = summary.failed_count();
    if failed > 0 {
        writeln!(writer, "  {} directories failed", failed)?;
    }

    Ok(())
}
