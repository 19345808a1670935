use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export previously uploaded files listed in a CSV manifest", long_about = None)]
pub struct Cli {
    /// Path to the uploads CSV manifest
    #[arg(long, default_value = "data/uploads.csv")]
    pub csv: PathBuf,

    /// Directory to save downloaded files
    #[arg(long, default_value = "exported_files")]
    pub output: PathBuf,

    /// Base delay before each download attempt (seconds)
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Max random jitter added to each delay (seconds)
    #[arg(long, default_value_t = 0.5)]
    pub jitter: f64,

    /// Maximum download attempts per file
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_retries: u32,

    /// Custom User-Agent string
    #[arg(long, default_value = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")]
    pub user_agent: String,

    /// List files without downloading
    #[arg(long)]
    pub dry_run: bool,
}
