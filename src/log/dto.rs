use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::nutrition::aggregate::Progress;
use crate::nutrition::{Goal, Macros};

use super::repo_types::{LogEntry, MealSlot, TIME_FORMAT};

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub food: String,
    pub quantity: f64,
    #[serde(default)]
    pub meal_slot: Option<MealSlot>,
    #[serde(default = "default_true")]
    pub training_day: bool,
    /// Explicit goal override; otherwise the config default for the mode.
    #[serde(default)]
    pub goal: Option<Goal>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Mode used for the ambient goal when the day has no entries.
    #[serde(default = "default_true")]
    pub training_day: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_days")]
    pub days: u32,
    /// Window end, defaults to today.
    #[serde(default)]
    pub as_of: Option<Date>,
    #[serde(default = "default_true")]
    pub training_day: bool,
}

fn default_true() -> bool {
    true
}
fn default_days() -> u32 {
    7
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub date: Date,
    pub time: String,
    pub meal_slot: Option<MealSlot>,
    pub food: String,
    pub quantity: f64,
    pub unit: String,
    pub macros: Macros,
    pub training_day: bool,
    pub goal: Goal,
}

impl From<LogEntry> for EntryResponse {
    fn from(e: LogEntry) -> Self {
        Self {
            id: e.id,
            date: e.date,
            time: e
                .time
                .format(TIME_FORMAT)
                .unwrap_or_else(|_| e.time.to_string()),
            meal_slot: e.meal_slot,
            food: e.food_name,
            quantity: e.quantity,
            unit: e.unit.as_cell().to_string(),
            macros: e.macros,
            training_day: e.training_day,
            goal: e.goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: Date,
    pub goal: Goal,
    pub totals: Macros,
    /// goal - totals per field; negative means over target.
    pub remaining: Macros,
    pub protein_ratio: f64,
    pub progress: Progress,
    pub entries: Vec<EntryResponse>,
}

#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    pub date: Date,
    pub totals: Macros,
    pub goal: Goal,
    pub protein_ratio: f64,
    pub progress: Progress,
}
