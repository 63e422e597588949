use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::catalog::{DictionaryService, FanSizeService, LinkedService};
use crate::database::infrastructure::memory::{
    InMemoryDictionaryRepository, InMemoryFanSizeRepository,
    InMemoryLinkedRepository, MemoryStore,
};
#[cfg(feature = "database")]
use crate::database::infrastructure::postgres::{
    PostgresDictionaryRepository, PostgresFanSizeRepository,
    PostgresLinkedRepository,
};
use crate::database::ports::{
    dictionary::DictionaryRepository, fan_sizes::FanSizeRepository,
    health::StoreHealth, linked::LinkedRepository,
};
#[cfg(feature = "database")]
use crate::database::postgres::PostgresDatabase;

/// Aggregates the repository ports used by the catalog services.
///
/// Handlers receive one of these through application state and never see
/// which backend sits behind the ports.
#[derive(Clone)]
pub struct CatalogUnitOfWork {
    pub dictionaries: Arc<dyn DictionaryRepository>,
    pub linked: Arc<dyn LinkedRepository>,
    pub fan_sizes: Arc<dyn FanSizeRepository>,
    pub health: Arc<dyn StoreHealth>,
}

impl fmt::Debug for CatalogUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogUnitOfWork")
            .field(
                "dictionaries",
                &type_name_of_val(self.dictionaries.as_ref()),
            )
            .field("linked", &type_name_of_val(self.linked.as_ref()))
            .field("fan_sizes", &type_name_of_val(self.fan_sizes.as_ref()))
            .field("health", &type_name_of_val(self.health.as_ref()))
            .finish()
    }
}

impl CatalogUnitOfWork {
    #[cfg(feature = "database")]
    pub fn from_postgres(database: Arc<PostgresDatabase>) -> Self {
        let pool = database.pool().clone();
        Self {
            dictionaries: Arc::new(PostgresDictionaryRepository::new(
                pool.clone(),
            )),
            linked: Arc::new(PostgresLinkedRepository::new(pool.clone())),
            fan_sizes: Arc::new(PostgresFanSizeRepository::new(pool)),
            health: database,
        }
    }

    /// Fresh, empty tables that live as long as the returned value.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            dictionaries: Arc::new(InMemoryDictionaryRepository::new(
                store.clone(),
            )),
            linked: Arc::new(InMemoryLinkedRepository::new(store.clone())),
            fan_sizes: Arc::new(InMemoryFanSizeRepository::new(store.clone())),
            health: store,
        }
    }

    pub fn dictionary_service(&self) -> DictionaryService {
        DictionaryService::new(self.dictionaries.clone())
    }

    pub fn linked_service(&self) -> LinkedService {
        LinkedService::new(self.linked.clone(), self.dictionaries.clone())
    }

    pub fn fan_size_service(&self) -> FanSizeService {
        FanSizeService::new(self.fan_sizes.clone())
    }
}
