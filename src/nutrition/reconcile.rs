use std::collections::HashMap;

use crate::foods::repo_types::FoodRecord;
use crate::log::repo_types::LogEntry;

use super::compute_macros;

/// Read-time projection of the log against the current food table. For each
/// entry whose food still exists, the macro fields are recomputed from the
/// food's current densities and standard weight; entries whose food has been
/// deleted (or renamed, which looks the same) keep their stored snapshot
/// untouched. Nothing is ever written back.
///
/// The quantity is reinterpreted under the entry's *stored* unit, not the
/// food's current one: if a food is later switched between grams and a
/// discrete unit, historical quantities keep their original meaning. Output
/// preserves order and cardinality and the whole transform is idempotent.
pub fn reconcile(entries: Vec<LogEntry>, foods: &HashMap<String, FoodRecord>) -> Vec<LogEntry> {
    entries
        .into_iter()
        .map(|mut entry| {
            if let Some(food) = foods.get(&entry.food_name) {
                entry.macros = compute_macros(
                    entry.quantity,
                    &entry.unit,
                    food.standard_weight_g,
                    food.per_100(),
                );
            }
            entry
        })
        .collect()
}
