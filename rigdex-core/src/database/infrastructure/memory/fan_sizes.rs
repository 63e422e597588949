use std::sync::Arc;

use async_trait::async_trait;
use rigdex_model::{FanSize, Page, PageRequest};
use uuid::Uuid;

use super::{MemoryStore, paginate};
use crate::database::ports::fan_sizes::FanSizeRepository;
use crate::error::{CatalogError, Result};

const DIMENSIONS_KEY: &str = "fan_sizes_length_width_height_key";

#[derive(Debug, Clone)]
pub struct InMemoryFanSizeRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryFanSizeRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FanSizeRepository for InMemoryFanSizeRepository {
    async fn list(&self) -> Result<Vec<FanSize>> {
        Ok(self.store.tables().read().await.fan_sizes.clone())
    }

    async fn page(&self, request: PageRequest) -> Result<Page<FanSize>> {
        let rows = self.list().await?;
        Ok(paginate(rows, request, |a, b| {
            a.dimensions()
                .cmp(&b.dimensions())
                .then_with(|| a.id.cmp(&b.id))
        }))
    }

    async fn get(&self, id: Uuid) -> Result<Option<FanSize>> {
        let tables = self.store.tables().read().await;
        Ok(tables.fan_sizes.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_dimensions(
        &self,
        length: i32,
        width: i32,
        height: i32,
    ) -> Result<Option<FanSize>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .fan_sizes
            .iter()
            .find(|row| row.dimensions() == (length, width, height))
            .cloned())
    }

    async fn insert(&self, fan_size: &FanSize) -> Result<()> {
        let mut tables = self.store.tables().write().await;
        if tables
            .fan_sizes
            .iter()
            .any(|row| row.dimensions() == fan_size.dimensions())
        {
            return Err(CatalogError::Conflict(DIMENSIONS_KEY.to_string()));
        }
        tables.fan_sizes.push(fan_size.clone());
        Ok(())
    }

    async fn update(&self, fan_size: &FanSize) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        if tables.fan_sizes.iter().any(|row| {
            row.id != fan_size.id && row.dimensions() == fan_size.dimensions()
        }) {
            return Err(CatalogError::Conflict(DIMENSIONS_KEY.to_string()));
        }
        match tables.fan_sizes.iter_mut().find(|row| row.id == fan_size.id) {
            Some(row) => {
                *row = fan_size.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        let before = tables.fan_sizes.len();
        tables.fan_sizes.retain(|row| row.id != id);
        Ok(tables.fan_sizes.len() != before)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.store.tables().read().await.fan_sizes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_orders_by_length_then_width_then_height() {
        let repo = InMemoryFanSizeRepository::new(MemoryStore::new());
        for (l, w, h) in [(140, 140, 25), (120, 120, 25), (120, 120, 15)] {
            repo.insert(&FanSize::new(l, w, h)).await.unwrap();
        }

        let page = repo.page(PageRequest::default()).await.unwrap();
        let dims: Vec<_> =
            page.content.iter().map(FanSize::dimensions).collect();
        assert_eq!(dims, [(120, 120, 15), (120, 120, 25), (140, 140, 25)]);
    }

    #[tokio::test]
    async fn update_onto_existing_dimensions_conflicts() {
        let repo = InMemoryFanSizeRepository::new(MemoryStore::new());
        let small = FanSize::new(80, 80, 25);
        repo.insert(&small).await.unwrap();
        repo.insert(&FanSize::new(92, 92, 25)).await.unwrap();

        let moved = FanSize {
            length: 92,
            width: 92,
            ..small
        };
        let err = repo.update(&moved).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }
}
