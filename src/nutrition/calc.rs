use serde::{Deserialize, Serialize};

/// How a quantity is denominated: grams directly, or a named discrete unit
/// ("unidad", "scoop (30g)", "rebanada", ...) that converts to grams through
/// the food's standard weight. Every discrete label shares the one
/// conversion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum Unit {
    Grams,
    Discrete(String),
}

impl Unit {
    /// Wire cell → unit. Anything that is not "g" is a discrete label.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "" | "g" => Unit::Grams,
            other => Unit::Discrete(other.to_string()),
        }
    }

    pub fn as_cell(&self) -> &str {
        match self {
            Unit::Grams => "g",
            Unit::Discrete(label) => label,
        }
    }
}

/// The four-tuple frozen into log rows and summed by aggregation. Calories
/// are kept whole, the rest at one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    pub fn add(&mut self, other: &Macros) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Convert a quantity in `unit` against per-100g densities into concrete
/// macro values.
///
/// Grams: `factor = quantity / 100`. Discrete: `factor = quantity *
/// standard_weight_g / 100`. Zero quantity (or a zero standard weight on a
/// discrete unit) yields all-zero macros rather than an error; negative
/// quantities are rejected by DTO validation before this is reached.
pub fn compute_macros(quantity: f64, unit: &Unit, standard_weight_g: f64, per_100: Macros) -> Macros {
    let grams = match unit {
        Unit::Grams => quantity,
        Unit::Discrete(_) => quantity * standard_weight_g,
    };
    let factor = grams / 100.0;
    Macros {
        calories: (per_100.calories * factor).round(),
        protein: round1(per_100.protein * factor),
        carbs: round1(per_100.carbs * factor),
        fat: round1(per_100.fat * factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_grams_is_identity() {
        let m = compute_macros(
            100.0,
            &Unit::Grams,
            1.0,
            Macros {
                calories: 130.0,
                protein: 2.7,
                carbs: 28.0,
                fat: 0.3,
            },
        );
        assert_eq!(m.calories, 130.0);
        assert_eq!(m.protein, 2.7);
        assert_eq!(m.carbs, 28.0);
        assert_eq!(m.fat, 0.3);
    }

    #[test]
    fn discrete_unit_goes_through_standard_weight() {
        // Two 55g eggs: factor 1.1.
        let m = compute_macros(
            2.0,
            &Unit::Discrete("unidad".into()),
            55.0,
            Macros {
                calories: 155.0,
                protein: 13.0,
                carbs: 1.1,
                fat: 11.0,
            },
        );
        assert_eq!(m.calories, 171.0);
        assert_eq!(m.protein, 14.3);
        assert_eq!(m.carbs, 1.2);
        assert_eq!(m.fat, 12.1);
    }

    #[test]
    fn zero_quantity_yields_zero_macros() {
        let m = compute_macros(
            0.0,
            &Unit::Grams,
            1.0,
            Macros {
                calories: 884.0,
                protein: 0.0,
                carbs: 0.0,
                fat: 100.0,
            },
        );
        assert_eq!(m, Macros::ZERO);
    }

    #[test]
    fn zero_standard_weight_degrades_to_zero_not_a_crash() {
        let m = compute_macros(
            3.0,
            &Unit::Discrete("scoop".into()),
            0.0,
            Macros {
                calories: 370.0,
                protein: 75.0,
                carbs: 4.0,
                fat: 2.0,
            },
        );
        assert_eq!(m, Macros::ZERO);
    }

    #[test]
    fn unit_cell_round_trip() {
        assert_eq!(Unit::from_cell("g"), Unit::Grams);
        assert_eq!(Unit::from_cell(""), Unit::Grams);
        assert_eq!(
            Unit::from_cell("scoop (30g)"),
            Unit::Discrete("scoop (30g)".into())
        );
        assert_eq!(Unit::Discrete("lata (160g)".into()).as_cell(), "lata (160g)");
    }
}
