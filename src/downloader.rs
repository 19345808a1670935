use crate::config::RunConfig;
use crate::error::ExporterError;
use crate::progress::ProgressObserver;
use crate::retry::{RetryDecision, RetryPolicy};
use crate::run_log::RunLogger;
use crate::types::{DownloadTask, TaskOutcome, TaskReport};
use futures::StreamExt;
use indicatif::HumanBytes;
use log::{info, warn};
use reqwest::header::USER_AGENT;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Downloader {
    client: reqwest::Client,
    endpoint: String,
    user_agent: String,
    policy: RetryPolicy,
}

impl Downloader {
    pub fn new(cfg: &RunConfig) -> Result<Self, ExporterError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            user_agent: cfg.user_agent.clone(),
            policy: RetryPolicy::new(cfg.base_delay, cfg.jitter, cfg.max_retries),
        })
    }

    /// Fetches one task to `dest`, retrying with backoff until the policy
    /// gives up. A permanent failure is reported in the returned
    /// `TaskReport`, never as an `Err`; errors here are log-write
    /// failures, which abort the run.
    pub async fn download(
        &self,
        task: &DownloadTask,
        dest: &Path,
        observer: &dyn ProgressObserver,
        log: &mut RunLogger,
    ) -> Result<TaskReport, ExporterError> {
        let url = task.remote_url(&self.endpoint);
        let save_name = task.save_name();
        let start = Instant::now();

        info!("Starting download: {}", url);
        log.line(&format!("downloading {} -> {}", url, dest.display()))?;

        let mut attempt = 1;
        loop {
            sleep(self.policy.delay_for_attempt(attempt)).await;
            log.attempt(&save_name, attempt, self.policy.max_attempts())?;

            match self.attempt(&url, dest, observer).await {
                Ok(bytes) => {
                    let duration = start.elapsed();
                    let speed = transfer_speed(bytes, duration);
                    info!("Downloaded {} ({} bytes, {})", save_name, bytes, speed);
                    log.success(&save_name, bytes, &speed)?;
                    return Ok(TaskReport {
                        task: task.clone(),
                        outcome: TaskOutcome::Downloaded,
                        bytes_downloaded: bytes,
                        duration,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("Attempt {} failed for {}: {}", attempt, url, e);
                    log.line(&format!(
                        "attempt {} failed save={} error={}",
                        attempt, save_name, e
                    ))?;

                    match self.policy.after_failure(attempt) {
                        RetryDecision::Retry => attempt += 1,
                        RetryDecision::GiveUp => {
                            let message = e.to_string();
                            log.failure(&save_name, &message)?;
                            return Ok(TaskReport {
                                task: task.clone(),
                                outcome: TaskOutcome::Failed,
                                bytes_downloaded: 0,
                                duration: start.elapsed(),
                                error: Some(message),
                            });
                        }
                    }
                }
            }
        }
    }

    async fn attempt(
        &self,
        url: &str,
        dest: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64, ExporterError> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::DownloadError(format!(
                "HTTP error: {} for URL: {}",
                status, url
            )));
        }

        let total = resp.content_length();
        observer.on_start(total);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Truncates any partial file left by an earlier attempt.
        let mut file = File::create(dest).await?;

        let mut downloaded: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ExporterError::DownloadError(e.to_string()))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            observer.on_chunk(downloaded);
        }
        file.flush().await?;

        if let Some(total) = total {
            if downloaded < total {
                return Err(ExporterError::DownloadError(format!(
                    "truncated body: {} of {} bytes",
                    downloaded, total
                )));
            }
        }

        Ok(downloaded)
    }
}

pub fn transfer_speed(bytes: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        format!("{}/s", HumanBytes((bytes as f64 / secs) as u64))
    } else {
        format!("{}/s", HumanBytes(bytes))
    }
}
