use crate::error::ExporterError;
use crate::types::{RunSummary, SkipReason};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const DETAILED_LOG_FILE: &str = "detailed.log";

pub struct RunLogger {
    file: File,
}

impl RunLogger {
    pub fn open(path: &Path) -> Result<Self, ExporterError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Appends one timestamped entry as a single write; an interrupted
    /// run never leaves a torn line.
    pub fn line(&mut self, message: &str) -> Result<(), ExporterError> {
        let stamp = Local::now().format("[%Y-%m-%d %H:%M:%S]");
        self.file
            .write_all(format!("{} {}\n", stamp, message).as_bytes())?;
        Ok(())
    }

    pub fn attempt(
        &mut self,
        save_name: &str,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<(), ExporterError> {
        self.line(&format!(
            "attempt {}/{} save={}",
            attempt, max_attempts, save_name
        ))
    }

    pub fn success(
        &mut self,
        save_name: &str,
        bytes: u64,
        speed: &str,
    ) -> Result<(), ExporterError> {
        self.line(&format!(
            "outcome=success save={} bytes={} speed={}",
            save_name, bytes, speed
        ))
    }

    pub fn skip(&mut self, save_name: &str, reason: SkipReason) -> Result<(), ExporterError> {
        self.line(&format!(
            "outcome=skip save={} reason={}",
            save_name,
            reason.describe()
        ))
    }

    pub fn failure(&mut self, save_name: &str, error: &str) -> Result<(), ExporterError> {
        self.line(&format!("outcome=failure save={} error={}", save_name, error))
    }

    pub fn dry_run(&mut self, save_name: &str, url: &str) -> Result<(), ExporterError> {
        self.line(&format!(
            "outcome=dry-run save={} would download {}",
            save_name, url
        ))
    }

    pub fn summary(&mut self, summary: &RunSummary) -> Result<(), ExporterError> {
        self.line(&format!(
            "run complete: downloaded={} skipped={} failed={} dry_run={} bytes={} elapsed={:.2?}",
            summary.downloaded,
            summary.skipped(),
            summary.failed,
            summary.dry_run,
            summary.total_bytes_downloaded,
            summary.total_duration
        ))
    }
}
