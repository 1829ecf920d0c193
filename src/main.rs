use std::io::{self, BufRead};

use chapter_renamer::cli::Args;
use chapter_renamer::logging;
use chapter_renamer::output::display_summary;
use chapter_renamer::ui::{Ui, UiConfig};
use chapter_renamer::{
    read_answer, AppError, DirectoryWalker, ExitCode, FileFilter, RunSummary, WalkOptions,
};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    let mut ui = Ui::new(UiConfig::new());
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let code = match run(&args, &mut input, &mut ui) {
        Ok(summary) if summary.has_failures() => ExitCode::RenameError,
        Ok(_) => ExitCode::Success,
        Err(e) => {
            error!("{}", e);
            eprintln!("\nError: {}", e.detailed_message());
            e.exit_code()
        }
    };

    if !args.no_pause {
        ui.pause_prompt();
        let _ = read_answer(&mut input);
    }

    std::process::exit(code.into());
}

fn run<R: BufRead>(args: &Args, input: &mut R, ui: &mut Ui) -> Result<RunSummary, AppError> {
    let target_dir = args.target_dir.as_deref().ok_or(AppError::InvalidArgument)?;

    let options = WalkOptions {
        recursive: args.recursive,
        filter: if args.all_files {
            FileFilter::All
        } else {
            FileFilter::default()
        },
        dry_run: args.dry,
    };

    info!(directory = ?target_dir, ?options, "Starting");

    let summary = DirectoryWalker::new(options, input, ui).walk(target_dir)?;

    debug!(
        directories = summary.directories.len(),
        renamed = summary.renamed_files(),
        "Run complete"
    );

    if args.recursive {
        display_summary(&summary, ui.writer())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
    }

    Ok(summary)
}
