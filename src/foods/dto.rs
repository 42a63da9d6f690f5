use serde::{Deserialize, Serialize};

use crate::nutrition::Unit;

use super::repo_types::FoodRecord;

#[derive(Debug, Deserialize)]
pub struct FoodBody {
    pub name: String,
    pub calories_per_100: f64,
    pub protein_per_100: f64,
    pub carbs_per_100: f64,
    pub fat_per_100: f64,
    /// "g" or a discrete label ("unidad", "scoop (30g)", ...).
    pub unit: String,
    #[serde(default)]
    pub standard_weight_g: Option<f64>,
}

impl FoodBody {
    pub fn validate(self) -> Result<FoodRecord, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("name must be non-empty".into());
        }
        for (label, v) in [
            ("calories_per_100", self.calories_per_100),
            ("protein_per_100", self.protein_per_100),
            ("carbs_per_100", self.carbs_per_100),
            ("fat_per_100", self.fat_per_100),
        ] {
            if v < 0.0 || !v.is_finite() {
                return Err(format!("{label} must be non-negative"));
            }
        }
        let unit = Unit::from_cell(&self.unit);
        let standard_weight_g = match unit {
            Unit::Grams => 1.0,
            Unit::Discrete(_) => {
                let w = self.standard_weight_g.unwrap_or(0.0);
                if w <= 0.0 || !w.is_finite() {
                    return Err("standard_weight_g must be positive for a discrete unit".into());
                }
                w
            }
        };
        Ok(FoodRecord {
            name,
            calories_per_100: self.calories_per_100,
            protein_per_100: self.protein_per_100,
            carbs_per_100: self.carbs_per_100,
            fat_per_100: self.fat_per_100,
            unit,
            standard_weight_g,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FoodResponse {
    pub name: String,
    pub calories_per_100: f64,
    pub protein_per_100: f64,
    pub carbs_per_100: f64,
    pub fat_per_100: f64,
    pub unit: String,
    pub standard_weight_g: f64,
}

impl From<FoodRecord> for FoodResponse {
    fn from(f: FoodRecord) -> Self {
        Self {
            name: f.name,
            calories_per_100: f.calories_per_100,
            protein_per_100: f.protein_per_100,
            carbs_per_100: f.carbs_per_100,
            fat_per_100: f.fat_per_100,
            unit: f.unit.as_cell().to_string(),
            standard_weight_g: f.standard_weight_g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, unit: &str, weight: Option<f64>) -> FoodBody {
        FoodBody {
            name: name.into(),
            calories_per_100: 155.0,
            protein_per_100: 13.0,
            carbs_per_100: 1.1,
            fat_per_100: 11.0,
            unit: unit.into(),
            standard_weight_g: weight,
        }
    }

    #[test]
    fn grams_food_ignores_missing_weight() {
        let food = body("Huevo", "g", None).validate().expect("valid");
        assert_eq!(food.standard_weight_g, 1.0);
    }

    #[test]
    fn discrete_food_requires_positive_weight() {
        assert!(body("Huevo", "unidad", None).validate().is_err());
        assert!(body("Huevo", "unidad", Some(0.0)).validate().is_err());
        let food = body("Huevo", "unidad", Some(55.0)).validate().expect("valid");
        assert_eq!(food.unit, Unit::Discrete("unidad".into()));
    }

    #[test]
    fn rejects_blank_name_and_negative_density() {
        assert!(body("   ", "g", None).validate().is_err());
        let mut b = body("Huevo", "g", None);
        b.fat_per_100 = -1.0;
        assert!(b.validate().is_err());
    }
}
