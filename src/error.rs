use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
