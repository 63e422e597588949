use async_trait::async_trait;
use rigdex_model::{DictionaryEntry, DictionaryKind, Page, PageRequest};
use uuid::Uuid;

use crate::error::Result;

/// Storage for every plain named lookup table, addressed by kind.
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    /// All rows in insertion order.
    async fn list(&self, kind: DictionaryKind) -> Result<Vec<DictionaryEntry>>;

    /// One page of rows sorted by name, ties broken by id.
    async fn page(
        &self,
        kind: DictionaryKind,
        request: PageRequest,
    ) -> Result<Page<DictionaryEntry>>;

    async fn get(
        &self,
        kind: DictionaryKind,
        id: Uuid,
    ) -> Result<Option<DictionaryEntry>>;

    async fn find_by_name(
        &self,
        kind: DictionaryKind,
        name: &str,
    ) -> Result<Option<DictionaryEntry>>;

    async fn insert(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<()>;

    /// Overwrite the stored name. Returns `false` when the row is gone.
    async fn update(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<bool>;

    /// Returns whether a row was removed.
    async fn delete(&self, kind: DictionaryKind, id: Uuid) -> Result<bool>;

    async fn count(&self, kind: DictionaryKind) -> Result<u64>;
}
