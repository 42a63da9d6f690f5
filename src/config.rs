use serde::Deserialize;

use crate::nutrition::Goal;

#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub token: String,
    pub food_tab: String,
    pub log_tab: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sheet: SheetConfig,
    pub training_goal: Goal,
    pub rest_goal: Goal,
    pub cache_ttl_secs: u64,
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let sheet = SheetConfig {
            base_url: std::env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| "https://sheets.googleapis.com".into()),
            spreadsheet_id: std::env::var("SHEETS_SPREADSHEET_ID")?,
            token: std::env::var("SHEETS_TOKEN")?,
            food_tab: std::env::var("SHEETS_FOOD_TAB").unwrap_or_else(|_| "Alimentos".into()),
            log_tab: std::env::var("SHEETS_LOG_TAB").unwrap_or_else(|_| "Registros".into()),
        };
        let training_goal = Goal {
            calories: env_f64("GOAL_TRAINING_KCAL", 1850.0),
            protein: env_f64("GOAL_TRAINING_PROT", 150.0),
            carbs: env_f64("GOAL_TRAINING_CARB", 180.0),
            fat: env_f64("GOAL_TRAINING_FAT", 60.0),
        };
        let rest_goal = Goal {
            calories: env_f64("GOAL_REST_KCAL", 1650.0),
            protein: env_f64("GOAL_REST_PROT", 145.0),
            carbs: env_f64("GOAL_REST_CARB", 130.0),
            fat: env_f64("GOAL_REST_FAT", 65.0),
        };
        let cache_ttl_secs = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        Ok(Self {
            sheet,
            training_goal,
            rest_goal,
            cache_ttl_secs,
        })
    }

    pub fn goal_for(&self, training_day: bool) -> Goal {
        if training_day {
            self.training_goal
        } else {
            self.rest_goal
        }
    }
}
