//! Record sources: where table rows come from.
//!
//! `RecordSource` is the one seam with two implementations, picked at startup:
//! `LocalTable` (CSV files) and `RemoteTable` (hosted records API). Handlers
//! never talk to a source directly; they go through `DataStore`, which caches
//! per table and turns every failure into an empty table plus a warning.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::airtable::RecordsApiError;
use crate::records::{Record, Table};

pub mod cache;
pub mod local;
pub mod remote;

pub use cache::{CachePolicy, Snapshot, TableCache};
pub use local::LocalTable;
pub use remote::RemoteTable;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("table file {0} has no header row")]
    MissingHeader(PathBuf),

    #[error("records API credential is not configured")]
    MissingCredential,

    #[error("records API request failed: {0}")]
    Remote(#[from] RecordsApiError),
}

/// Loads all rows of a table.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short label for logs and `/health`.
    fn kind(&self) -> &'static str;

    async fn fetch(&self, table: Table) -> Result<Vec<Record>, SourceError>;
}

/// Result of a cached table load. Never an error: a failed load is an empty
/// table with a warning for the page.
#[derive(Debug, Clone)]
pub struct TableLoad {
    pub records: Snapshot,
    pub warning: Option<String>,
}

#[derive(Clone)]
pub struct DataStore {
    source: Arc<dyn RecordSource>,
    cache: TableCache,
}

impl DataStore {
    pub fn new(source: Arc<dyn RecordSource>, policy: CachePolicy) -> Self {
        Self {
            source,
            cache: TableCache::new(policy),
        }
    }

    pub fn source_kind(&self) -> &'static str {
        self.source.kind()
    }

    pub fn policy(&self) -> &CachePolicy {
        self.cache.policy()
    }

    pub async fn load(&self, table: Table) -> TableLoad {
        let source = Arc::clone(&self.source);
        let result = self
            .cache
            .get_or_load(table, async move {
                let records = source.fetch(table).await?;
                info!(
                    "Loaded {} records from {} table '{}'",
                    records.len(),
                    source.kind(),
                    table
                );
                Ok::<_, SourceError>(records)
            })
            .await;

        match result {
            Ok(records) => TableLoad {
                records,
                warning: None,
            },
            Err(e) => {
                warn!("Failed to load table '{table}': {e}");
                TableLoad {
                    records: Arc::new(Vec::new()),
                    warning: Some(format!("Could not load {table} data: {e}")),
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticSource;
    use super::*;

    #[tokio::test]
    async fn test_load_is_cached_per_table() {
        let source = Arc::new(StaticSource::default().with_table(
            Table::Skills,
            vec![Record::from_pairs([("Name", "Rust")])],
        ));
        let store = DataStore::new(source.clone(), CachePolicy::uniform(None));

        for _ in 0..3 {
            let load = store.load(Table::Skills).await;
            assert_eq!(load.records.len(), 1);
            assert!(load.warning.is_none());
        }
        store.load(Table::Projects).await;

        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_yields_empty_table_and_warning() {
        let source = Arc::new(StaticSource::default().failing(Table::Education));
        let store = DataStore::new(source.clone(), CachePolicy::uniform(None));

        let load = store.load(Table::Education).await;
        assert!(load.records.is_empty());
        let warning = load.warning.expect("expected a warning");
        assert!(warning.contains("education"), "{warning}");

        // not cached: the next request retries
        store.load(Table::Education).await;
        assert_eq!(source.fetch_count(), 2);
    }
}
