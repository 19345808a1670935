use crate::history::CompletedLog;
use crate::types::{DownloadTask, SkipReason};
use std::path::Path;
use walkdir::WalkDir;

/// Decides whether a task is already satisfied. Checks run cheapest
/// first: the in-memory completed set, then the output directory, then a
/// recursive walk of the optional local check directory.
pub fn check_skip(
    task: &DownloadTask,
    history: &dyn CompletedLog,
    output_dir: &Path,
    local_check_dir: Option<&Path>,
) -> Option<SkipReason> {
    let save_name = task.save_name();

    if history.contains(&save_name) {
        return Some(SkipReason::AlreadyLogged);
    }

    if output_dir.join(&save_name).exists() {
        return Some(SkipReason::ExistsInOutput);
    }

    if let Some(dir) = local_check_dir {
        if found_in_directory(dir, &save_name) {
            return Some(SkipReason::FoundInLocalDir);
        }
    }

    None
}

fn found_in_directory(dir: &Path, save_name: &str) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| e.file_type().is_file() && e.file_name().to_string_lossy() == save_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::FileCompletedLog;

    fn task(filename: &str) -> DownloadTask {
        DownloadTask {
            filename: filename.to_string(),
            extension: "png".to_string(),
            subdomain: "acct".to_string(),
        }
    }

    fn empty_history(dir: &Path) -> FileCompletedLog {
        FileCompletedLog::open(&dir.join("downloaded.log")).unwrap()
    }

    #[test]
    fn test_new_task_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let history = empty_history(dir.path());

        let skip = check_skip(&task("fresh"), &history, dir.path(), None);
        assert_eq!(skip, None);
    }

    #[test]
    fn test_completed_log_wins_over_filesystem_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = empty_history(dir.path());
        history.append("seen.png").unwrap();
        // Present in the output directory as well; the log check comes first.
        std::fs::write(dir.path().join("seen.png"), b"x").unwrap();

        let skip = check_skip(&task("seen"), &history, dir.path(), None);
        assert_eq!(skip, Some(SkipReason::AlreadyLogged));
    }

    #[test]
    fn test_existing_output_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let history = empty_history(dir.path());
        std::fs::write(dir.path().join("present.png"), b"x").unwrap();

        let skip = check_skip(&task("present"), &history, dir.path(), None);
        assert_eq!(skip, Some(SkipReason::ExistsInOutput));
    }

    #[test]
    fn test_local_check_dir_is_searched_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let history = empty_history(dir.path());

        let local = dir.path().join("backup");
        std::fs::create_dir_all(local.join("2023/06")).unwrap();
        std::fs::write(local.join("2023/06/archived.png"), b"x").unwrap();

        let skip = check_skip(&task("archived"), &history, dir.path(), Some(&local));
        assert_eq!(skip, Some(SkipReason::FoundInLocalDir));

        let skip = check_skip(&task("elsewhere"), &history, dir.path(), Some(&local));
        assert_eq!(skip, None);
    }
}
