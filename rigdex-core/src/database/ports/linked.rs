use async_trait::async_trait;
use rigdex_model::{LinkedEntry, LinkedKind, Page, PageRequest};
use uuid::Uuid;

use crate::error::Result;

/// Storage for rows that reference a dictionary parent.
///
/// Reads return the parent resolved; writes only persist the parent id.
#[async_trait]
pub trait LinkedRepository: Send + Sync {
    async fn list(&self, kind: LinkedKind) -> Result<Vec<LinkedEntry>>;

    /// One page sorted by name, then parent name, then id.
    async fn page(
        &self,
        kind: LinkedKind,
        request: PageRequest,
    ) -> Result<Page<LinkedEntry>>;

    async fn get(&self, kind: LinkedKind, id: Uuid)
    -> Result<Option<LinkedEntry>>;

    async fn find_by_name_and_parent(
        &self,
        kind: LinkedKind,
        name: &str,
        parent_id: Uuid,
    ) -> Result<Option<LinkedEntry>>;

    async fn insert(&self, kind: LinkedKind, entry: &LinkedEntry) -> Result<()>;

    async fn update(&self, kind: LinkedKind, entry: &LinkedEntry)
    -> Result<bool>;

    async fn delete(&self, kind: LinkedKind, id: Uuid) -> Result<bool>;

    async fn count(&self, kind: LinkedKind) -> Result<u64>;
}
