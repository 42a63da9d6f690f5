use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Duration};

use crate::log::repo_types::LogEntry;

use super::{Goal, Macros};

/// Sum the four macro fields per calendar day.
pub fn aggregate_by_date(entries: &[LogEntry]) -> BTreeMap<Date, Macros> {
    let mut days: BTreeMap<Date, Macros> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.date).or_default().add(&entry.macros);
    }
    days
}

/// `aggregate_by_date` restricted to `[as_of - window_days, as_of]`.
pub fn aggregate_window(
    entries: &[LogEntry],
    window_days: u32,
    as_of: Date,
) -> BTreeMap<Date, Macros> {
    let start = as_of - Duration::days(window_days as i64);
    aggregate_by_date(entries)
        .into_iter()
        .filter(|(date, _)| *date >= start && *date <= as_of)
        .collect()
}

/// Effective goal for a date: the snapshot of the first entry logged that
/// day (arrival order, which is sheet order), falling back to the ambient
/// session goal when the day has no entries.
pub fn goal_for_date(entries: &[LogEntry], date: Date, ambient: Goal) -> Goal {
    entries
        .iter()
        .find(|e| e.date == date)
        .map(|e| e.goal)
        .unwrap_or(ambient)
}

/// At-a-glance status against the protein target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    OnTrack,
    NearTarget,
    BelowTarget,
    /// Goal of zero: the ratio is undefined, reported as 0 instead of a
    /// division blow-up.
    Undetermined,
}

/// actual/goal, clamped to 0 when the goal is not a usable divisor.
pub fn progress_ratio(actual: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        actual / goal
    } else {
        0.0
    }
}

pub fn classify_progress(actual: f64, goal: f64) -> Progress {
    if goal <= 0.0 {
        return Progress::Undetermined;
    }
    let ratio = actual / goal;
    if ratio >= 1.0 {
        Progress::OnTrack
    } else if ratio >= 0.8 {
        Progress::NearTarget
    } else {
        Progress::BelowTarget
    }
}
