use std::sync::Arc;

use async_trait::async_trait;
use rigdex_model::{DictionaryEntry, DictionaryKind, Page, PageRequest};
use uuid::Uuid;

use super::{MemoryStore, paginate};
use crate::database::ports::dictionary::DictionaryRepository;
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone)]
pub struct InMemoryDictionaryRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryDictionaryRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

fn name_conflict(kind: DictionaryKind) -> CatalogError {
    CatalogError::Conflict(format!("{}_name_key", kind.table()))
}

#[async_trait]
impl DictionaryRepository for InMemoryDictionaryRepository {
    async fn list(&self, kind: DictionaryKind) -> Result<Vec<DictionaryEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables.dictionary(kind).to_vec())
    }

    async fn page(
        &self,
        kind: DictionaryKind,
        request: PageRequest,
    ) -> Result<Page<DictionaryEntry>> {
        let rows = self.list(kind).await?;
        Ok(paginate(rows, request, |a, b| {
            a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
        }))
    }

    async fn get(
        &self,
        kind: DictionaryKind,
        id: Uuid,
    ) -> Result<Option<DictionaryEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .dictionary(kind)
            .iter()
            .find(|entry| entry.id == id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        kind: DictionaryKind,
        name: &str,
    ) -> Result<Option<DictionaryEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .dictionary(kind)
            .iter()
            .find(|entry| entry.name == name)
            .cloned())
    }

    async fn insert(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<()> {
        let mut tables = self.store.tables().write().await;
        let rows = tables.dictionary_mut(kind);
        if rows.iter().any(|row| row.name == entry.name) {
            return Err(name_conflict(kind));
        }
        if rows.iter().any(|row| row.id == entry.id) {
            return Err(CatalogError::Conflict(format!("{}_pkey", kind.table())));
        }
        rows.push(entry.clone());
        Ok(())
    }

    async fn update(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        let rows = tables.dictionary_mut(kind);
        if rows
            .iter()
            .any(|row| row.name == entry.name && row.id != entry.id)
        {
            return Err(name_conflict(kind));
        }
        match rows.iter_mut().find(|row| row.id == entry.id) {
            Some(row) => {
                row.name = entry.name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, kind: DictionaryKind, id: Uuid) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        let rows = tables.dictionary_mut(kind);
        let before = rows.len();
        rows.retain(|row| row.id != id);
        let removed = rows.len() != before;
        if removed {
            tables.cascade_delete(kind, id);
        }
        Ok(removed)
    }

    async fn count(&self, kind: DictionaryKind) -> Result<u64> {
        let tables = self.store.tables().read().await;
        Ok(tables.dictionary(kind).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryDictionaryRepository {
        InMemoryDictionaryRepository::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = repo();
        for name in ["LGA 1700", "AM5", "AM4"] {
            repo.insert(DictionaryKind::Socket, &DictionaryEntry::new(name))
                .await
                .unwrap();
        }

        let names: Vec<_> = repo
            .list(DictionaryKind::Socket)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, ["LGA 1700", "AM5", "AM4"]);
    }

    #[tokio::test]
    async fn kinds_do_not_share_rows() {
        let repo = repo();
        repo.insert(DictionaryKind::Vendor, &DictionaryEntry::new("ASUS"))
            .await
            .unwrap();

        assert_eq!(repo.count(DictionaryKind::Vendor).await.unwrap(), 1);
        assert_eq!(repo.count(DictionaryKind::Manufacturer).await.unwrap(), 0);
        assert!(
            repo.find_by_name(DictionaryKind::Manufacturer, "ASUS")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = repo();
        repo.insert(DictionaryKind::Socket, &DictionaryEntry::new("AM5"))
            .await
            .unwrap();

        let err = repo
            .insert(DictionaryKind::Socket, &DictionaryEntry::new("AM5"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = repo();
        let entry = DictionaryEntry::new("AM5");
        repo.insert(DictionaryKind::Socket, &entry).await.unwrap();

        assert!(repo.delete(DictionaryKind::Socket, entry.id).await.unwrap());
        assert!(!repo.delete(DictionaryKind::Socket, entry.id).await.unwrap());
    }
}
