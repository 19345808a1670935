use crate::config::RunConfig;
use crate::dedup;
use crate::downloader::Downloader;
use crate::error::ExporterError;
use crate::history::{CompletedLog, FileCompletedLog};
use crate::parser;
use crate::progress::BatchProgress;
use crate::run_log::RunLogger;
use crate::types::{RunSummary, TaskOutcome, TaskReport};
use log::info;
use std::time::{Duration, Instant};

/// Processes every manifest entry in order: skip, dry-run, or download.
/// Fatal errors (manifest/config problems, log writes) abort the run;
/// per-task download failures do not.
pub async fn run(cfg: &RunConfig) -> Result<RunSummary, ExporterError> {
    let tasks = parser::parse_manifest(&cfg.csv_path, cfg.subdomain.as_deref()).await?;
    info!("Parsed {} entries from manifest", tasks.len());

    tokio::fs::create_dir_all(&cfg.output_dir).await?;

    let mut history = FileCompletedLog::open(&cfg.completed_log)?;
    let mut log = RunLogger::open(&cfg.detailed_log)?;
    log.line(&format!(
        "run start: csv={} output={} delay={} jitter={} max_retries={} dry_run={}",
        cfg.csv_path.display(),
        cfg.output_dir.display(),
        cfg.base_delay,
        cfg.jitter,
        cfg.max_retries,
        cfg.dry_run
    ))?;

    let downloader = Downloader::new(cfg)?;
    let progress = BatchProgress::new(tasks.len());
    let start = Instant::now();
    let mut reports = Vec::with_capacity(tasks.len());

    for task in tasks {
        let save_name = task.save_name();
        let dest = cfg.output_dir.join(&save_name);

        if let Some(reason) = dedup::check_skip(
            &task,
            &history,
            &cfg.output_dir,
            cfg.local_check_dir.as_deref(),
        ) {
            info!("Skipping {} ({})", save_name, reason.describe());
            log.skip(&save_name, reason)?;
            reports.push(TaskReport {
                task,
                outcome: TaskOutcome::Skipped(reason),
                bytes_downloaded: 0,
                duration: Duration::ZERO,
                error: None,
            });
            progress.advance();
            continue;
        }

        if cfg.dry_run {
            let url = task.remote_url(&cfg.endpoint);
            info!("Dry run, would download {}", url);
            log.dry_run(&save_name, &url)?;
            reports.push(TaskReport {
                task,
                outcome: TaskOutcome::DryRun,
                bytes_downloaded: 0,
                duration: Duration::ZERO,
                error: None,
            });
            progress.advance();
            continue;
        }

        let bar = progress.file_bar(&save_name);
        let report = downloader.download(&task, &dest, &bar, &mut log).await?;
        bar.clear();

        if report.outcome == TaskOutcome::Downloaded {
            history.append(&save_name)?;
        }
        reports.push(report);
        progress.advance();
    }

    progress.finish();

    let summary = RunSummary::from_reports(reports, start.elapsed());
    log.summary(&summary)?;
    Ok(summary)
}
