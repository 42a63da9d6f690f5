use tracing::warn;

use crate::nutrition::{Macros, Unit};
use crate::store::{cell, cell_f64, Row};

/// One row of the food reference tab. `name` is the table's key; there is
/// no surrogate id in the sheet schema, so log entries reference foods by
/// this value and a rename orphans them (they fall back to their snapshots).
///
/// Columns: Alimento, Kcal, Prot, Carb, Gras, Tipo_Unidad, Peso_Standard.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub name: String,
    pub calories_per_100: f64,
    pub protein_per_100: f64,
    pub carbs_per_100: f64,
    pub fat_per_100: f64,
    pub unit: Unit,
    pub standard_weight_g: f64,
}

impl FoodRecord {
    /// The per-100g densities viewed as a macro tuple for the calculator.
    pub fn per_100(&self) -> Macros {
        Macros {
            calories: self.calories_per_100,
            protein: self.protein_per_100,
            carbs: self.carbs_per_100,
            fat: self.fat_per_100,
        }
    }

    /// Lenient row parse: a row without a name is unusable and skipped;
    /// junk numeric cells degrade to 0.0.
    pub fn from_row(row: &Row) -> Option<FoodRecord> {
        let name = cell(row, 0).trim();
        if name.is_empty() {
            warn!(?row, "food row without a name, skipping");
            return None;
        }
        let unit = Unit::from_cell(cell(row, 5));
        let standard_weight_g = match cell_f64(row, 6) {
            w if w > 0.0 => w,
            _ => 1.0,
        };
        Some(FoodRecord {
            name: name.to_string(),
            calories_per_100: cell_f64(row, 1),
            protein_per_100: cell_f64(row, 2),
            carbs_per_100: cell_f64(row, 3),
            fat_per_100: cell_f64(row, 4),
            unit,
            standard_weight_g,
        })
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.name.clone(),
            self.calories_per_100.to_string(),
            self.protein_per_100.to_string(),
            self.carbs_per_100.to_string(),
            self.fat_per_100.to_string(),
            self.unit.as_cell().to_string(),
            self.standard_weight_g.to_string(),
        ]
    }
}
