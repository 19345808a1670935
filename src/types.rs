use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub filename: String,
    pub extension: String,
    pub subdomain: String,
}

impl DownloadTask {
    pub fn save_name(&self) -> String {
        format!("{}.{}", self.filename, self.extension)
    }

    pub fn remote_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            endpoint.trim_end_matches('/'),
            self.subdomain,
            self.filename,
            self.extension
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyLogged,
    ExistsInOutput,
    FoundInLocalDir,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::AlreadyLogged => "already-downloaded",
            SkipReason::ExistsInOutput => "exists-in-output",
            SkipReason::FoundInLocalDir => "found-in-local-dir",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Downloaded,
    Skipped(SkipReason),
    DryRun,
    Failed,
}

#[derive(Debug)]
pub struct TaskReport {
    pub task: DownloadTask,
    pub outcome: TaskOutcome,
    pub bytes_downloaded: u64,
    pub duration: Duration,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub total_tasks: usize,
    pub downloaded: usize,
    pub skipped_logged: usize,
    pub skipped_output: usize,
    pub skipped_local: usize,
    pub dry_run: usize,
    pub failed: usize,
    pub total_bytes_downloaded: u64,
    pub total_duration: Duration,
    pub reports: Vec<TaskReport>,
}

impl RunSummary {
    pub fn from_reports(reports: Vec<TaskReport>, total_duration: Duration) -> Self {
        let mut summary = Self {
            total_tasks: reports.len(),
            downloaded: 0,
            skipped_logged: 0,
            skipped_output: 0,
            skipped_local: 0,
            dry_run: 0,
            failed: 0,
            total_bytes_downloaded: 0,
            total_duration,
            reports: Vec::new(),
        };

        for report in &reports {
            match report.outcome {
                TaskOutcome::Downloaded => {
                    summary.downloaded += 1;
                    summary.total_bytes_downloaded += report.bytes_downloaded;
                }
                TaskOutcome::Skipped(SkipReason::AlreadyLogged) => summary.skipped_logged += 1,
                TaskOutcome::Skipped(SkipReason::ExistsInOutput) => summary.skipped_output += 1,
                TaskOutcome::Skipped(SkipReason::FoundInLocalDir) => summary.skipped_local += 1,
                TaskOutcome::DryRun => summary.dry_run += 1,
                TaskOutcome::Failed => summary.failed += 1,
            }
        }

        summary.reports = reports;
        summary
    }

    pub fn skipped(&self) -> usize {
        self.skipped_logged + self.skipped_output + self.skipped_local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(filename: &str, extension: &str, subdomain: &str) -> DownloadTask {
        DownloadTask {
            filename: filename.to_string(),
            extension: extension.to_string(),
            subdomain: subdomain.to_string(),
        }
    }

    #[test]
    fn test_save_name_joins_filename_and_extension() {
        assert_eq!(task("shot_01", "png", "acct").save_name(), "shot_01.png");
    }

    #[test]
    fn test_remote_url_composition() {
        let t = task("shot_01", "png", "acct");
        assert_eq!(
            t.remote_url("https://host.example/uploads"),
            "https://host.example/uploads/acct/shot_01.png"
        );
    }

    #[test]
    fn test_remote_url_tolerates_trailing_slash() {
        let t = task("a", "gif", "sub");
        assert_eq!(
            t.remote_url("http://127.0.0.1:9999/"),
            "http://127.0.0.1:9999/sub/a.gif"
        );
    }

    #[test]
    fn test_summary_counts_by_outcome() {
        let reports = vec![
            TaskReport {
                task: task("a", "png", "s"),
                outcome: TaskOutcome::Downloaded,
                bytes_downloaded: 100,
                duration: Duration::from_secs(1),
                error: None,
            },
            TaskReport {
                task: task("b", "png", "s"),
                outcome: TaskOutcome::Skipped(SkipReason::AlreadyLogged),
                bytes_downloaded: 0,
                duration: Duration::ZERO,
                error: None,
            },
            TaskReport {
                task: task("c", "png", "s"),
                outcome: TaskOutcome::Skipped(SkipReason::ExistsInOutput),
                bytes_downloaded: 0,
                duration: Duration::ZERO,
                error: None,
            },
            TaskReport {
                task: task("d", "png", "s"),
                outcome: TaskOutcome::Failed,
                bytes_downloaded: 0,
                duration: Duration::from_secs(2),
                error: Some("HTTP error".to_string()),
            },
        ];

        let summary = RunSummary::from_reports(reports, Duration::from_secs(3));
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_bytes_downloaded, 100);
    }
}
