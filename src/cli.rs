use clap::{Args, Parser, Subcommand};
use gpuconv::engine::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gpuconv")]
#[command(version)]
#[command(about = "Batch-convert a folder of videos with a GPU encoder via ffmpeg", long_about = None)]
pub struct Cli {
    /// Folder of videos to convert (defaults to current directory)
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// ffmpeg binary to use (overrides config and bundled copy)
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test-encode with every known GPU encoder and list the ones that work
    Probe {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the video files that would be converted.
    ///
    /// Standalone utility: encoders are not probed, so this works without a
    /// usable GPU or ffmpeg.
    List {
        /// Folder to list (defaults to current directory)
        directory: Option<PathBuf>,
    },

    /// Convert every video in a folder into <folder>/converted
    Convert(ConvertArgs),

    /// Check that the ffmpeg binary runs
    CheckFfmpeg,

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(Args, Default)]
pub struct ConvertArgs {
    /// Folder to convert (defaults to current directory)
    pub directory: Option<PathBuf>,

    /// Encoder identifier, e.g. hevc_nvenc (defaults to config, then first working encoder)
    #[arg(short, long)]
    pub encoder: Option<String>,

    /// Output container: .mp4, .mkv or .webm
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Print one progress line per file instead of the dashboard
    #[arg(long)]
    pub plain: bool,

    /// Show the jobs and ffmpeg commands without converting
    #[arg(long)]
    pub dry_run: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
