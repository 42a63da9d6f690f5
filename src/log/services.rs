use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::foods;
use crate::nutrition::aggregate::{
    aggregate_window, classify_progress, goal_for_date, progress_ratio,
};
use crate::nutrition::reconcile::reconcile;
use crate::nutrition::{compute_macros, Goal, Macros};
use crate::state::AppState;

use super::dto::{CreateEntryRequest, DayResponse, DaySummaryResponse, EntryResponse};
use super::repo;
use super::repo_types::LogEntry;

/// Compute the macro snapshot, freeze the active goal and append one log
/// row. Returns `None` when the food is unknown (the caller turns that
/// into a 404 rather than logging a row with no reference).
pub async fn create_entry(
    state: &AppState,
    body: CreateEntryRequest,
) -> anyhow::Result<Option<LogEntry>> {
    let table = foods::repo::food_map(state).await?;
    let Some(food) = table.get(&body.food) else {
        return Ok(None);
    };

    let goal = body
        .goal
        .unwrap_or_else(|| state.config.goal_for(body.training_day));
    let macros = compute_macros(
        body.quantity,
        &food.unit,
        food.standard_weight_g,
        food.per_100(),
    );
    let now = OffsetDateTime::now_utc();
    // The sheet keeps HH:MM, so the entry does too.
    let time = time::Time::from_hms(now.hour(), now.minute(), 0).unwrap_or(now.time());
    let entry = LogEntry {
        id: Uuid::new_v4(),
        date: now.date(),
        time,
        meal_slot: body.meal_slot,
        food_name: food.name.clone(),
        quantity: body.quantity,
        unit: food.unit.clone(),
        macros,
        training_day: body.training_day,
        goal,
    };
    repo::append_entry(state, &entry).await?;
    info!(id = %entry.id, food = %entry.food_name, "log entry created");
    Ok(Some(entry))
}

pub async fn delete_entry(state: &AppState, id: Uuid) -> anyhow::Result<bool> {
    let deleted = repo::delete_by_id(state, id).await?;
    if deleted {
        info!(%id, "log entry deleted");
    }
    Ok(deleted)
}

/// The whole log reconciled against the current food table, in sheet
/// order.
pub async fn reconciled_entries(state: &AppState) -> anyhow::Result<Vec<LogEntry>> {
    let entries = repo::load_entries(state).await?;
    let table = foods::repo::food_map(state).await?;
    Ok(reconcile(entries, &table))
}

fn remaining(goal: Goal, totals: &Macros) -> Macros {
    Macros {
        calories: goal.calories - totals.calories,
        protein: goal.protein - totals.protein,
        carbs: goal.carbs - totals.carbs,
        fat: goal.fat - totals.fat,
    }
}

/// One day's reconciled entries with totals and progress against the
/// day's effective goal.
pub async fn day_view(
    state: &AppState,
    date: Date,
    training_day: bool,
) -> anyhow::Result<DayResponse> {
    let all = reconciled_entries(state).await?;
    let ambient = state.config.goal_for(training_day);
    let goal = goal_for_date(&all, date, ambient);

    let day_entries: Vec<LogEntry> = all.into_iter().filter(|e| e.date == date).collect();
    let mut totals = Macros::ZERO;
    for entry in &day_entries {
        totals.add(&entry.macros);
    }

    Ok(DayResponse {
        date,
        goal,
        remaining: remaining(goal, &totals),
        protein_ratio: progress_ratio(totals.protein, goal.protein),
        progress: classify_progress(totals.protein, goal.protein),
        totals,
        entries: day_entries.into_iter().map(EntryResponse::from).collect(),
    })
}

/// Daily summaries for the trailing window ending at `as_of`, newest
/// first.
pub async fn history(
    state: &AppState,
    days: u32,
    as_of: Date,
    training_day: bool,
) -> anyhow::Result<Vec<DaySummaryResponse>> {
    let all = reconciled_entries(state).await?;
    let ambient = state.config.goal_for(training_day);
    let window = aggregate_window(&all, days, as_of);

    let mut summaries: Vec<DaySummaryResponse> = window
        .into_iter()
        .map(|(date, totals)| {
            let goal = goal_for_date(&all, date, ambient);
            DaySummaryResponse {
                date,
                goal,
                protein_ratio: progress_ratio(totals.protein, goal.protein),
                progress: classify_progress(totals.protein, goal.protein),
                totals,
            }
        })
        .collect();
    summaries.reverse();
    Ok(summaries)
}
