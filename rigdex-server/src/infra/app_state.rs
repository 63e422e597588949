use std::{fmt, sync::Arc};

use rigdex_core::CatalogUnitOfWork;
use rigdex_core::catalog::{DictionaryService, FanSizeService, LinkedService};

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<CatalogUnitOfWork>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("unit_of_work", &self.unit_of_work)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(unit_of_work: Arc<CatalogUnitOfWork>, config: Arc<Config>) -> Self {
        Self {
            unit_of_work,
            config,
        }
    }

    pub fn dictionaries(&self) -> DictionaryService {
        self.unit_of_work.dictionary_service()
    }

    pub fn linked(&self) -> LinkedService {
        self.unit_of_work.linked_service()
    }

    pub fn fan_sizes(&self) -> FanSizeService {
        self.unit_of_work.fan_size_service()
    }
}
