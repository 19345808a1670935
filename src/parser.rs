use crate::error::ExporterError;
use crate::types::DownloadTask;
use csv::ReaderBuilder;
use log::debug;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

pub async fn parse_manifest(
    path: &Path,
    default_subdomain: Option<&str>,
) -> Result<Vec<DownloadTask>, ExporterError> {
    let mut file = File::open(path).await.map_err(|e| {
        ExporterError::ParseError(format!("cannot open manifest {}: {}", path.display(), e))
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).await.map_err(|e| {
        ExporterError::ParseError(format!("cannot read manifest {}: {}", path.display(), e))
    })?;

    let mut reader = ReaderBuilder::new().from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ExporterError::ParseError(e.to_string()))?
        .clone();
    let filename_idx = column_index(&headers, "Filename")?;
    let extension_idx = column_index(&headers, "Extension")?;
    let subdomain_idx = headers.iter().position(|h| h == "Subdomain");

    let mut tasks = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ExporterError::ParseError(e.to_string()))?;
        // Row 0 sits on line 2, below the header.
        let line = row + 2;

        let filename = record.get(filename_idx).unwrap_or("").trim();
        let extension = record.get(extension_idx).unwrap_or("").trim();
        if filename.is_empty() || extension.is_empty() {
            return Err(ExporterError::ParseError(format!(
                "line {}: empty filename or extension",
                line
            )));
        }

        let row_subdomain = subdomain_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let subdomain = match row_subdomain.or(default_subdomain) {
            Some(s) => s.to_string(),
            None => {
                return Err(ExporterError::ConfigError(format!(
                    "line {}: no subdomain in manifest and no default configured",
                    line
                )))
            }
        };

        let task = DownloadTask {
            filename: filename.to_string(),
            extension: extension.to_string(),
            subdomain,
        };
        debug!("Parsed task: {:?}", task);
        tasks.push(task);
    }

    Ok(tasks)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, ExporterError> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        ExporterError::ParseError(format!("manifest is missing required column \"{}\"", name))
    })
}
