use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chapter-renamer")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename audiobook chapter files into sequential names (001.mp3, 002.mp3, ...)")]
pub struct Args {
    /// Directory containing the chapter files
    pub target_dir: Option<PathBuf>,

    /// Also process every immediate subdirectory of the target
    #[arg(short, long)]
    pub recursive: bool,

    /// Include every file, not only .mp3 files
    #[arg(short, long)]
    pub all_files: bool,

    /// Show the planned renames without prompting or touching the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Exit immediately instead of waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}
