use clap::Parser;
use colored::*;
use indicatif::HumanBytes;
use log::{error, info};
use std::path::Path;

use tixte_exporter::cli::Cli;
use tixte_exporter::config::{self, RunConfig};
use tixte_exporter::downloader::transfer_speed;
use tixte_exporter::run::run;
use tixte_exporter::types::TaskOutcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Starting Tixte exporter");

    let cli = Cli::parse();
    let config = match config::load_config(Path::new(config::CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Err(e.into());
        }
    };

    let cfg = RunConfig::new(cli, config);
    println!("{} {}", "Output directory:".bold(), cfg.output_dir.display());
    println!("{} {}", "Manifest:".bold(), cfg.csv_path.display());

    let summary = match run(&cfg).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Export failed: {}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Err(e.into());
        }
    };

    println!("\n{}", "Export Summary:".bold());
    println!("Total files processed: {}", summary.total_tasks);
    println!(
        "{} {}",
        "Downloaded:".green(),
        summary.downloaded.to_string().green()
    );
    println!("Skipped (already downloaded): {}", summary.skipped_logged);
    println!("Skipped (exists in output): {}", summary.skipped_output);
    println!("Skipped (found in local dir): {}", summary.skipped_local);
    if cfg.dry_run {
        println!("Dry run, not downloaded: {}", summary.dry_run);
    }
    println!("{} {}", "Failed:".red(), summary.failed.to_string().red());
    println!(
        "Total data transferred: {}",
        HumanBytes(summary.total_bytes_downloaded)
    );
    println!("Total duration: {:.2?}", summary.total_duration);

    if summary.downloaded > 0 {
        println!("\n{}", "Downloaded files:".green().bold());
        for report in summary
            .reports
            .iter()
            .filter(|r| r.outcome == TaskOutcome::Downloaded)
        {
            println!(
                "✓ {} ({} in {:.2?}, {})",
                report.task.save_name().green(),
                HumanBytes(report.bytes_downloaded),
                report.duration,
                transfer_speed(report.bytes_downloaded, report.duration)
            );
        }
    }

    if summary.failed > 0 {
        println!("\n{}", "Failed downloads:".red().bold());
        for report in summary
            .reports
            .iter()
            .filter(|r| r.outcome == TaskOutcome::Failed)
        {
            println!(
                "✗ {} - Error: {}",
                report.task.save_name().red(),
                report.error.as_deref().unwrap_or("unknown")
            );
        }
        error!("{} downloads failed", summary.failed);
        anyhow::bail!("Some downloads failed");
    }

    Ok(())
}
