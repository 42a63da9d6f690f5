use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::store::cache::TableCache;
use crate::store::sheets::SheetsClient;
use crate::store::TabularStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TabularStore>,
    pub config: Arc<AppConfig>,
    pub foods_cache: Arc<TableCache>,
    pub log_cache: Arc<TableCache>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(SheetsClient::new(
            &config.sheet.base_url,
            &config.sheet.spreadsheet_id,
            &config.sheet.token,
        )) as Arc<dyn TabularStore>;
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn TabularStore>, config: Arc<AppConfig>) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let foods_cache = Arc::new(TableCache::new(config.sheet.food_tab.clone(), ttl));
        let log_cache = Arc::new(TableCache::new(config.sheet.log_tab.clone(), ttl));
        Self {
            store,
            config,
            foods_cache,
            log_cache,
        }
    }

    /// In-memory state for unit tests: no network, default goals, empty
    /// tabs.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::SheetConfig;
        use crate::nutrition::Goal;
        use crate::store::memory::MemoryStore;

        let config = Arc::new(AppConfig {
            sheet: SheetConfig {
                base_url: "http://fake.local".into(),
                spreadsheet_id: "fake".into(),
                token: "fake".into(),
                food_tab: "Alimentos".into(),
                log_tab: "Registros".into(),
            },
            training_goal: Goal {
                calories: 1850.0,
                protein: 150.0,
                carbs: 180.0,
                fat: 60.0,
            },
            rest_goal: Goal {
                calories: 1650.0,
                protein: 145.0,
                carbs: 130.0,
                fat: 65.0,
            },
            cache_ttl_secs: 60,
        });
        let store = Arc::new(MemoryStore::new()) as Arc<dyn TabularStore>;
        Self::from_parts(store, config)
    }
}
