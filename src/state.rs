use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::foods::catalog::FoodCatalog;
use crate::storage::{KvStore, MemoryStore, RedisStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KvStore>,
    pub catalog: Arc<FoodCatalog>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.store_backend {
            StoreBackend::Redis => {
                Arc::new(RedisStore::connect(&config.redis_url).await?) as Arc<dyn KvStore>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; entries are lost on exit");
                Arc::new(MemoryStore::new()) as Arc<dyn KvStore>
            }
        };

        let catalog = Arc::new(FoodCatalog::load(&config.food_catalog_path)?);

        Ok(Self {
            config,
            store,
            catalog,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn KvStore>,
        catalog: Arc<FoodCatalog>,
    ) -> Self {
        Self {
            config,
            store,
            catalog,
        }
    }

    /// State backed by a fresh [`MemoryStore`], for tests and local runs.
    pub fn in_memory(catalog: FoodCatalog) -> Self {
        let config = Arc::new(AppConfig {
            redis_url: "redis://localhost:6379/0".into(),
            store_backend: StoreBackend::Memory,
            food_catalog_path: "foundation_foods.json".into(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()), Arc::new(catalog))
    }

    /// Releases the store connection. Called once the server has drained.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
