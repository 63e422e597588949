use async_trait::async_trait;
use rigdex_model::{FanSize, Page, PageRequest};
use uuid::Uuid;

use crate::error::Result;

#[async_trait]
pub trait FanSizeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<FanSize>>;

    /// One page sorted by length, width, height.
    async fn page(&self, request: PageRequest) -> Result<Page<FanSize>>;

    async fn get(&self, id: Uuid) -> Result<Option<FanSize>>;

    async fn find_by_dimensions(
        &self,
        length: i32,
        width: i32,
        height: i32,
    ) -> Result<Option<FanSize>>;

    async fn insert(&self, fan_size: &FanSize) -> Result<()>;

    async fn update(&self, fan_size: &FanSize) -> Result<bool>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn count(&self) -> Result<u64>;
}
