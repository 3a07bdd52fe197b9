use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::records::{Record, Table};
use crate::sources::{RecordSource, SourceError};

/// Reads `{data_dir}/{table}.csv`. First row is the header; every cell is a
/// string.
pub struct LocalTable {
    data_dir: PathBuf,
}

impl LocalTable {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.data_dir.join(format!("{}.csv", table.name()))
    }
}

#[async_trait]
impl RecordSource for LocalTable {
    fn kind(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, table: Table) -> Result<Vec<Record>, SourceError> {
        let path = self.path_for(table);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;

        let records = parse_csv(&bytes, &path)?;
        debug!("Read {} rows from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Parses CSV bytes into records. Short rows simply lack the trailing fields;
/// blank rows are skipped.
pub fn parse_csv(bytes: &[u8], path: &Path) -> Result<Vec<Record>, SourceError> {
    let malformed = |source: csv::Error| SourceError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(SourceError::MissingHeader(path.to_path_buf()));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        let record = Record::from_pairs(
            headers
                .iter()
                .zip(row.iter())
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        if !record.is_blank() {
            records.push(record);
        }
    }

    Ok(records)
}
