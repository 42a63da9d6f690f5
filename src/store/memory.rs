use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{data_index_to_row, Row, StoreError, TabularStore};

/// In-memory stand-in for the remote sheet, with the same absolute-row
/// addressing. Backs `AppState::fake()` and the service tests.
#[derive(Default)]
pub struct MemoryStore {
    tabs: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TabularStore for MemoryStore {
    async fn read_rows(&self, tab: &str) -> Result<Vec<Row>, StoreError> {
        Ok(self.tabs.read().await.get(tab).cloned().unwrap_or_default())
    }

    async fn append_row(&self, tab: &str, row: Row) -> Result<(), StoreError> {
        self.tabs
            .write()
            .await
            .entry(tab.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn find_row(&self, tab: &str, value: &str) -> Result<Option<u32>, StoreError> {
        let tabs = self.tabs.read().await;
        let rows = match tabs.get(tab) {
            Some(rows) => rows,
            None => return Ok(None),
        };
        for (i, row) in rows.iter().enumerate() {
            if row.iter().any(|cell| cell == value) {
                return Ok(Some(data_index_to_row(i)));
            }
        }
        Ok(None)
    }

    async fn delete_row(&self, tab: &str, row: u32) -> Result<(), StoreError> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| StoreError::BadResponse(format!("unknown tab {tab}")))?;
        let index = row
            .checked_sub(2)
            .map(|i| i as usize)
            .filter(|i| *i < rows.len())
            .ok_or_else(|| StoreError::BadResponse(format!("row {row} out of range")))?;
        rows.remove(index);
        Ok(())
    }

    async fn update_row(&self, tab: &str, row: u32, values: Row) -> Result<(), StoreError> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| StoreError::BadResponse(format!("unknown tab {tab}")))?;
        let index = row
            .checked_sub(2)
            .map(|i| i as usize)
            .filter(|i| *i < rows.len())
            .ok_or_else(|| StoreError::BadResponse(format!("row {row} out of range")))?;
        rows[index] = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_returns_absolute_sheet_row() {
        let store = MemoryStore::new();
        store
            .append_row("Registros", vec!["a".into(), "b".into()])
            .await
            .expect("append");
        store
            .append_row("Registros", vec!["c".into(), "d".into()])
            .await
            .expect("append");

        // First data row is sheet row 2 (header is row 1).
        assert_eq!(store.find_row("Registros", "a").await.unwrap(), Some(2));
        assert_eq!(store.find_row("Registros", "d").await.unwrap(), Some(3));
        assert_eq!(store.find_row("Registros", "zzz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_shifts_later_rows_up() {
        let store = MemoryStore::new();
        for v in ["one", "two", "three"] {
            store.append_row("t", vec![v.to_string()]).await.unwrap();
        }
        store.delete_row("t", 2).await.expect("delete");
        let rows = store.read_rows("t").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(store.find_row("t", "two").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn update_overwrites_in_place() {
        let store = MemoryStore::new();
        store.append_row("t", vec!["old".into()]).await.unwrap();
        store
            .update_row("t", 2, vec!["new".into()])
            .await
            .expect("update");
        assert_eq!(store.read_rows("t").await.unwrap()[0], vec!["new"]);
    }

    #[tokio::test]
    async fn delete_out_of_range_is_an_error() {
        let store = MemoryStore::new();
        store.append_row("t", vec!["x".into()]).await.unwrap();
        assert!(store.delete_row("t", 5).await.is_err());
        assert!(store.delete_row("t", 1).await.is_err());
    }
}
