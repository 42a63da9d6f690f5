use std::collections::HashMap;

use anyhow::Context;

use crate::state::AppState;

use super::repo_types::FoodRecord;

/// Current food reference table, served through the TTL cache, sorted by
/// name the way the original picker sorts it. Malformed rows are dropped
/// by the lenient parse.
pub async fn list_foods(state: &AppState) -> anyhow::Result<Vec<FoodRecord>> {
    let rows = state
        .foods_cache
        .read_through(state.store.as_ref())
        .await
        .context("read food table")?;
    let mut foods: Vec<FoodRecord> = rows.iter().filter_map(FoodRecord::from_row).collect();
    foods.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(foods)
}

/// Food table keyed by name, for reconciliation and lookups.
pub async fn food_map(state: &AppState) -> anyhow::Result<HashMap<String, FoodRecord>> {
    Ok(list_foods(state)
        .await?
        .into_iter()
        .map(|f| (f.name.clone(), f))
        .collect())
}

pub async fn create_food(state: &AppState, food: &FoodRecord) -> anyhow::Result<()> {
    state
        .store
        .append_row(state.foods_cache.tab(), food.to_row())
        .await
        .context("append food row")?;
    state.foods_cache.invalidate().await;
    Ok(())
}

/// Range-update the row found by the original name. Returns false when no
/// such food exists.
pub async fn update_food(
    state: &AppState,
    original_name: &str,
    food: &FoodRecord,
) -> anyhow::Result<bool> {
    let tab = state.foods_cache.tab();
    let Some(row) = state
        .store
        .find_row(tab, original_name)
        .await
        .context("find food row")?
    else {
        return Ok(false);
    };
    state
        .store
        .update_row(tab, row, food.to_row())
        .await
        .context("update food row")?;
    state.foods_cache.invalidate().await;
    Ok(true)
}

pub async fn delete_food(state: &AppState, name: &str) -> anyhow::Result<bool> {
    let tab = state.foods_cache.tab();
    let Some(row) = state
        .store
        .find_row(tab, name)
        .await
        .context("find food row")?
    else {
        return Ok(false);
    };
    state
        .store
        .delete_row(tab, row)
        .await
        .context("delete food row")?;
    state.foods_cache.invalidate().await;
    Ok(true)
}
