use anyhow::Context;
use uuid::Uuid;

use crate::state::AppState;

use super::repo_types::LogEntry;

/// Full log in sheet (arrival) order, served through the TTL cache.
/// Malformed rows are dropped by the lenient parse.
pub async fn load_entries(state: &AppState) -> anyhow::Result<Vec<LogEntry>> {
    let rows = state
        .log_cache
        .read_through(state.store.as_ref())
        .await
        .context("read log table")?;
    Ok(rows.iter().filter_map(LogEntry::from_row).collect())
}

pub async fn append_entry(state: &AppState, entry: &LogEntry) -> anyhow::Result<()> {
    state
        .store
        .append_row(state.log_cache.tab(), entry.to_row())
        .await
        .context("append log row")?;
    state.log_cache.invalidate().await;
    Ok(())
}

/// Delete the row holding `id`. Returns false when no such entry exists.
pub async fn delete_by_id(state: &AppState, id: Uuid) -> anyhow::Result<bool> {
    let tab = state.log_cache.tab();
    let Some(row) = state
        .store
        .find_row(tab, &id.to_string())
        .await
        .context("find log row")?
    else {
        return Ok(false);
    };
    state
        .store
        .delete_row(tab, row)
        .await
        .context("delete log row")?;
    state.log_cache.invalidate().await;
    Ok(true)
}
