pub mod aggregate;
pub mod calc;
pub mod reconcile;

pub use calc::{compute_macros, Macros, Unit};

use serde::{Deserialize, Serialize};

/// Daily macro targets. Selected by training/rest mode from config and
/// threaded explicitly through every call that needs it; a copy is frozen
/// into each log entry at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}
