use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Time};
use tracing::warn;
use uuid::Uuid;

use crate::nutrition::{Goal, Macros, Unit};
use crate::store::{cell, cell_f64, Row};

pub const DATE_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const TIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[hour]:[minute]");

/// Meal slot label, present only in the later log schema. Wire cells keep
/// the sheet's Spanish labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    PreWorkout,
    PostWorkout,
}

impl MealSlot {
    pub fn from_cell(cell: &str) -> Option<Self> {
        match cell.trim().to_lowercase().as_str() {
            "desayuno" => Some(Self::Breakfast),
            "almuerzo" => Some(Self::Lunch),
            "cena" => Some(Self::Dinner),
            "snack" => Some(Self::Snack),
            "pre-entreno" => Some(Self::PreWorkout),
            "post-entreno" => Some(Self::PostWorkout),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> &'static str {
        match self {
            Self::Breakfast => "Desayuno",
            Self::Lunch => "Almuerzo",
            Self::Dinner => "Cena",
            Self::Snack => "Snack",
            Self::PreWorkout => "Pre-Entreno",
            Self::PostWorkout => "Post-Entreno",
        }
    }
}

/// One meal log row. Append-only: created once with a macro and goal
/// snapshot, deleted by id, never rewritten — corrected macro values come
/// from reconciliation at read time, not from the sheet.
///
/// Current columns: Log_ID, Fecha, Hora, Momento, Alimento, Cantidad_Input,
/// Unidad, Kcal, Prot, Carb, Gras, Es_Entreno, Meta_Kcal, Meta_Prot,
/// Meta_Carb, Meta_Gras. The pre-Momento 15-column layout still parses.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: Uuid,
    pub date: Date,
    pub time: Time,
    pub meal_slot: Option<MealSlot>,
    pub food_name: String,
    pub quantity: f64,
    /// The unit the quantity was entered in, frozen at log time. May
    /// diverge from the food's current unit after edits.
    pub unit: Unit,
    pub macros: Macros,
    pub training_day: bool,
    pub goal: Goal,
}

impl LogEntry {
    /// Lenient parse. Rows missing a usable id, date or food name are
    /// skipped with a warning; junk numeric cells degrade to 0.0.
    pub fn from_row(row: &Row) -> Option<LogEntry> {
        let id = match cell(row, 0).trim().parse::<Uuid>() {
            Ok(id) => id,
            Err(_) => {
                warn!(?row, "log row without a parsable id, skipping");
                return None;
            }
        };
        let date = match Date::parse(cell(row, 1).trim(), DATE_FORMAT) {
            Ok(d) => d,
            Err(_) => {
                warn!(%id, "log row without a parsable date, skipping");
                return None;
            }
        };
        let time = Time::parse(cell(row, 2).trim(), TIME_FORMAT).unwrap_or(Time::MIDNIGHT);

        // Momento was inserted at column 3; older rows shift everything
        // after Hora one column left.
        let (meal_slot, base) = if row.len() > 15 {
            (MealSlot::from_cell(cell(row, 3)), 4)
        } else {
            (None, 3)
        };

        let food_name = cell(row, base).trim().to_string();
        if food_name.is_empty() {
            warn!(%id, "log row without a food name, skipping");
            return None;
        }

        Some(LogEntry {
            id,
            date,
            time,
            meal_slot,
            food_name,
            quantity: cell_f64(row, base + 1),
            unit: Unit::from_cell(cell(row, base + 2)),
            macros: Macros {
                calories: cell_f64(row, base + 3),
                protein: cell_f64(row, base + 4),
                carbs: cell_f64(row, base + 5),
                fat: cell_f64(row, base + 6),
            },
            training_day: cell(row, base + 7).trim().eq_ignore_ascii_case("true"),
            goal: Goal {
                calories: cell_f64(row, base + 8),
                protein: cell_f64(row, base + 9),
                carbs: cell_f64(row, base + 10),
                fat: cell_f64(row, base + 11),
            },
        })
    }

    /// Always writes the current 16-column layout.
    pub fn to_row(&self) -> Row {
        let date = self
            .date
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| self.date.to_string());
        let time = self
            .time
            .format(TIME_FORMAT)
            .unwrap_or_else(|_| self.time.to_string());
        vec![
            self.id.to_string(),
            date,
            time,
            self.meal_slot.map(|s| s.as_cell()).unwrap_or("").to_string(),
            self.food_name.clone(),
            self.quantity.to_string(),
            self.unit.as_cell().to_string(),
            self.macros.calories.to_string(),
            self.macros.protein.to_string(),
            self.macros.carbs.to_string(),
            self.macros.fat.to_string(),
            if self.training_day { "True" } else { "False" }.to_string(),
            self.goal.calories.to_string(),
            self.goal.protein.to_string(),
            self.goal.carbs.to_string(),
            self.goal.fat.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    const ID: &str = "5e0faf6e-6f8a-4f06-9a7c-2b4f0f6d9c11";

    #[test]
    fn parses_a_current_sixteen_column_row() {
        let entry = LogEntry::from_row(&row(&[
            ID, "2026-08-20", "12:30", "Almuerzo", "Arroz Blanco (Cocido)", "150", "g", "195",
            "4.1", "42", "0.5", "True", "1850", "150", "180", "60",
        ]))
        .expect("row should parse");
        assert_eq!(entry.date, date!(2026 - 08 - 20));
        assert_eq!(entry.time, time!(12:30));
        assert_eq!(entry.meal_slot, Some(MealSlot::Lunch));
        assert_eq!(entry.food_name, "Arroz Blanco (Cocido)");
        assert_eq!(entry.quantity, 150.0);
        assert_eq!(entry.unit, Unit::Grams);
        assert_eq!(entry.macros.calories, 195.0);
        assert!(entry.training_day);
        assert_eq!(entry.goal.protein, 150.0);
    }

    #[test]
    fn parses_a_legacy_fifteen_column_row() {
        let entry = LogEntry::from_row(&row(&[
            ID, "2025-11-02", "08:15", "Huevo Entero (Grande)", "2", "unidad", "171", "14.3",
            "1.2", "12.1", "False", "1650", "145", "130", "65",
        ]))
        .expect("row should parse");
        assert_eq!(entry.meal_slot, None);
        assert_eq!(entry.food_name, "Huevo Entero (Grande)");
        assert_eq!(entry.unit, Unit::Discrete("unidad".into()));
        assert_eq!(entry.macros.protein, 14.3);
        assert!(!entry.training_day);
        assert_eq!(entry.goal.fat, 65.0);
    }

    #[test]
    fn rows_missing_key_fields_are_skipped() {
        // No id.
        assert!(LogEntry::from_row(&row(&[
            "not-a-uuid", "2026-08-20", "12:30", "", "Arroz", "150", "g", "1", "1", "1", "1",
            "True", "1", "1", "1", "1",
        ]))
        .is_none());
        // No date.
        assert!(LogEntry::from_row(&row(&[
            ID, "ayer", "12:30", "", "Arroz", "150", "g", "1", "1", "1", "1", "True", "1", "1",
            "1", "1",
        ]))
        .is_none());
        // No food.
        assert!(LogEntry::from_row(&row(&[
            ID, "2026-08-20", "12:30", "", "", "150", "g", "1", "1", "1", "1", "True", "1", "1",
            "1", "1",
        ]))
        .is_none());
    }

    #[test]
    fn junk_time_and_numerics_degrade() {
        let entry = LogEntry::from_row(&row(&[
            ID, "2026-08-20", "mediodía", "", "Arroz", "mucho", "g", "x", "y", "z", "w", "True",
            "1850", "150", "180", "60",
        ]))
        .expect("row should parse");
        assert_eq!(entry.time, Time::MIDNIGHT);
        assert_eq!(entry.quantity, 0.0);
        assert_eq!(entry.macros, Macros::ZERO);
    }

    #[test]
    fn row_round_trip() {
        let entry = LogEntry {
            id: ID.parse().unwrap(),
            date: date!(2026 - 08 - 20),
            time: time!(19:05),
            meal_slot: Some(MealSlot::Dinner),
            food_name: "Whey Protein".into(),
            quantity: 1.5,
            unit: Unit::Discrete("scoop (30g)".into()),
            macros: Macros {
                calories: 167.0,
                protein: 33.8,
                carbs: 1.8,
                fat: 0.9,
            },
            training_day: true,
            goal: Goal {
                calories: 1850.0,
                protein: 150.0,
                carbs: 180.0,
                fat: 60.0,
            },
        };
        assert_eq!(LogEntry::from_row(&entry.to_row()), Some(entry));
    }
}
