use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;

use crate::records::{Record, Table};

/// An immutable snapshot of one table, shared by every render inside the TTL
/// window.
pub type Snapshot = Arc<Vec<Record>>;

/// Time-to-live per table. `None` means the snapshot never expires.
#[derive(Debug, Clone, PartialEq)]
pub struct CachePolicy {
    pub default_ttl: Option<Duration>,
    pub overrides: HashMap<Table, Option<Duration>>,
}

impl CachePolicy {
    pub fn uniform(ttl: Option<Duration>) -> Self {
        Self {
            default_ttl: ttl,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, table: Table, ttl: Option<Duration>) -> Self {
        self.overrides.insert(table, ttl);
        self
    }

    pub fn ttl_for(&self, table: Table) -> Option<Duration> {
        self.overrides
            .get(&table)
            .copied()
            .unwrap_or(self.default_ttl)
    }
}

struct TableExpiry(CachePolicy);

impl Expiry<Table, Snapshot> for TableExpiry {
    fn expire_after_create(
        &self,
        key: &Table,
        _value: &Snapshot,
        _created_at: Instant,
    ) -> Option<Duration> {
        self.0.ttl_for(*key)
    }
}

/// Memoizes table loads keyed by table, with the TTL the policy assigns to
/// that table. Concurrent misses for the same table share one load; failed
/// loads are not stored.
#[derive(Clone)]
pub struct TableCache {
    inner: Cache<Table, Snapshot>,
    policy: Arc<CachePolicy>,
}

impl TableCache {
    pub fn new(policy: CachePolicy) -> Self {
        let inner = Cache::builder()
            .max_capacity(Table::ALL.len() as u64)
            .expire_after(TableExpiry(policy.clone()))
            .build();
        Self {
            inner,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub async fn get_or_load<F, E>(&self, table: Table, load: F) -> Result<Snapshot, Arc<E>>
    where
        F: Future<Output = Result<Vec<Record>, E>>,
        E: Send + Sync + 'static,
    {
        self.inner
            .try_get_with(table, async move { load.await.map(Arc::new) })
            .await
    }
}
