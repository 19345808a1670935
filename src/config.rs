use crate::cli::Cli;
use crate::error::ExporterError;
use crate::history::COMPLETED_LOG_FILE;
use crate::run_log::DETAILED_LOG_FILE;
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

const DEFAULT_ENDPOINT: &str = "https://us-east-1.tixte.net/uploads";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub subdomain: Option<String>,
    pub local_check_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
}

pub fn load_config(path: &Path) -> Result<Config, ExporterError> {
    if !path.exists() {
        warn!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        ExporterError::ConfigError(format!("invalid JSON in {}: {}", path.display(), e))
    })
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub base_delay: f64,
    pub jitter: f64,
    pub max_retries: u32,
    pub user_agent: String,
    pub dry_run: bool,
    pub subdomain: Option<String>,
    pub local_check_dir: Option<PathBuf>,
    pub endpoint: String,
    pub completed_log: PathBuf,
    pub detailed_log: PathBuf,
}

impl RunConfig {
    pub fn new(cli: Cli, config: Config) -> Self {
        Self {
            csv_path: cli.csv,
            output_dir: cli.output,
            base_delay: cli.delay,
            jitter: cli.jitter,
            max_retries: cli.max_retries,
            user_agent: cli.user_agent,
            dry_run: cli.dry_run,
            subdomain: config.subdomain,
            local_check_dir: config.local_check_dir,
            endpoint: config
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            completed_log: PathBuf::from(COMPLETED_LOG_FILE),
            detailed_log: PathBuf::from(DETAILED_LOG_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json")).unwrap();
        assert!(config.subdomain.is_none());
        assert!(config.local_check_dir.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_valid_config_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"subdomain": "acct", "local_check_dir": "/tmp/backup"}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.subdomain.as_deref(), Some("acct"));
        assert_eq!(
            config.local_check_dir.as_deref(),
            Some(Path::new("/tmp/backup"))
        );
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        match load_config(&path) {
            Err(ExporterError::ConfigError(msg)) => assert!(msg.contains("invalid JSON")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
