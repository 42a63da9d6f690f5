use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::{Row, StoreError, TabularStore};

/// Short-TTL snapshot of one tab. Every write path must call `invalidate`
/// on the cache of the tab it touched before returning, otherwise the next
/// read can serve the pre-write snapshot for up to a TTL.
pub struct TableCache {
    tab: String,
    ttl: Duration,
    slot: RwLock<Option<(Instant, Arc<Vec<Row>>)>>,
}

impl TableCache {
    pub fn new(tab: impl Into<String>, ttl: Duration) -> Self {
        Self {
            tab: tab.into(),
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    pub async fn read_through(
        &self,
        store: &dyn TabularStore,
    ) -> Result<Arc<Vec<Row>>, StoreError> {
        if let Some((at, rows)) = self.slot.read().await.as_ref() {
            if at.elapsed() < self.ttl {
                return Ok(rows.clone());
            }
        }
        let rows = Arc::new(store.read_rows(&self.tab).await?);
        *self.slot.write().await = Some((Instant::now(), rows.clone()));
        Ok(rows)
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}
