use crate::error::ExporterError;
use chrono::Local;
use log::debug;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub const COMPLETED_LOG_FILE: &str = "downloaded.log";

/// Persistent record of files already retrieved, consulted to make runs
/// idempotent.
pub trait CompletedLog {
    fn contains(&self, save_name: &str) -> bool;
    fn append(&mut self, save_name: &str) -> Result<(), ExporterError>;
}

pub struct FileCompletedLog {
    file: File,
    entries: HashSet<String>,
}

impl FileCompletedLog {
    pub fn open(path: &Path) -> Result<Self, ExporterError> {
        let mut entries = HashSet::new();
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                if let Some(name) = entry_name(&line?) {
                    entries.insert(name);
                }
            }
        }
        debug!(
            "Loaded {} completed entries from {}",
            entries.len(),
            path.display()
        );

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file, entries })
    }
}

impl CompletedLog for FileCompletedLog {
    fn contains(&self, save_name: &str) -> bool {
        self.entries.contains(save_name)
    }

    fn append(&mut self, save_name: &str) -> Result<(), ExporterError> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.file
            .write_all(format!("{}\t{}\n", stamp, save_name).as_bytes())?;
        self.entries.insert(save_name.to_string());
        Ok(())
    }
}

// A line is either "<timestamp>\t<name>" or a bare output path from
// earlier runs; either way the final path segment is the save name.
fn entry_name(line: &str) -> Option<String> {
    let field = line.rsplit('\t').next().unwrap_or(line).trim();
    if field.is_empty() {
        return None;
    }
    Path::new(field)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_then_contains() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileCompletedLog::open(&dir.path().join("downloaded.log")).unwrap();

        assert!(!log.contains("a.png"));
        log.append("a.png").unwrap();
        assert!(log.contains("a.png"));
        assert!(!log.contains("b.png"));
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded.log");

        {
            let mut log = FileCompletedLog::open(&path).unwrap();
            log.append("a.png").unwrap();
            log.append("b.mp4").unwrap();
        }

        let log = FileCompletedLog::open(&path).unwrap();
        assert!(log.contains("a.png"));
        assert!(log.contains("b.mp4"));
    }

    #[test]
    fn test_bare_path_lines_are_matched_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded.log");
        std::fs::write(&path, "exported_files/old.png\n\n").unwrap();

        let log = FileCompletedLog::open(&path).unwrap();
        assert!(log.contains("old.png"));
    }

    #[test]
    fn test_appended_lines_are_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded.log");

        let mut log = FileCompletedLog::open(&path).unwrap();
        log.append("a.png").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let (stamp, name) = line.split_once('\t').unwrap();
        assert!(!stamp.is_empty());
        assert_eq!(name, "a.png");
    }
}
