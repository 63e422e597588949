use std::sync::Arc;

use async_trait::async_trait;
use rigdex_model::{LinkedEntry, LinkedKind, Page, PageRequest};
use uuid::Uuid;

use super::{LinkedRecord, MemoryStore, Tables, paginate};
use crate::database::ports::linked::LinkedRepository;
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone)]
pub struct InMemoryLinkedRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryLinkedRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

/// Join a stored child with its parent. Rows whose parent vanished are
/// skipped, matching the inner join used by the Postgres adapter.
fn resolve(
    tables: &Tables,
    kind: LinkedKind,
    record: &LinkedRecord,
) -> Option<LinkedEntry> {
    let parent = tables
        .dictionary(kind.parent())
        .iter()
        .find(|parent| parent.id == record.parent_id)?;

    Some(LinkedEntry {
        id: record.id,
        name: record.name.clone(),
        parent: parent.clone(),
    })
}

fn ensure_parent(tables: &Tables, kind: LinkedKind, parent_id: Uuid) -> Result<()> {
    let exists = tables
        .dictionary(kind.parent())
        .iter()
        .any(|parent| parent.id == parent_id);
    if exists {
        Ok(())
    } else {
        Err(CatalogError::MissingReference(format!(
            "{}_{}_fkey",
            kind.table(),
            kind.parent_column()
        )))
    }
}

fn key_conflict(kind: LinkedKind) -> CatalogError {
    CatalogError::Conflict(format!(
        "{}_name_{}_key",
        kind.table(),
        kind.parent_column()
    ))
}

#[async_trait]
impl LinkedRepository for InMemoryLinkedRepository {
    async fn list(&self, kind: LinkedKind) -> Result<Vec<LinkedEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .linked(kind)
            .iter()
            .filter_map(|record| resolve(&tables, kind, record))
            .collect())
    }

    async fn page(
        &self,
        kind: LinkedKind,
        request: PageRequest,
    ) -> Result<Page<LinkedEntry>> {
        let rows = self.list(kind).await?;
        Ok(paginate(rows, request, |a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.parent.name.cmp(&b.parent.name))
                .then_with(|| a.id.cmp(&b.id))
        }))
    }

    async fn get(
        &self,
        kind: LinkedKind,
        id: Uuid,
    ) -> Result<Option<LinkedEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .linked(kind)
            .iter()
            .find(|record| record.id == id)
            .and_then(|record| resolve(&tables, kind, record)))
    }

    async fn find_by_name_and_parent(
        &self,
        kind: LinkedKind,
        name: &str,
        parent_id: Uuid,
    ) -> Result<Option<LinkedEntry>> {
        let tables = self.store.tables().read().await;
        Ok(tables
            .linked(kind)
            .iter()
            .find(|record| record.name == name && record.parent_id == parent_id)
            .and_then(|record| resolve(&tables, kind, record)))
    }

    async fn insert(&self, kind: LinkedKind, entry: &LinkedEntry) -> Result<()> {
        let mut tables = self.store.tables().write().await;
        ensure_parent(&tables, kind, entry.parent_id())?;

        let rows = tables.linked_mut(kind);
        if rows.iter().any(|row| {
            row.name == entry.name && row.parent_id == entry.parent_id()
        }) {
            return Err(key_conflict(kind));
        }
        rows.push(LinkedRecord {
            id: entry.id,
            name: entry.name.clone(),
            parent_id: entry.parent_id(),
        });
        Ok(())
    }

    async fn update(
        &self,
        kind: LinkedKind,
        entry: &LinkedEntry,
    ) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        ensure_parent(&tables, kind, entry.parent_id())?;

        let rows = tables.linked_mut(kind);
        if rows.iter().any(|row| {
            row.id != entry.id
                && row.name == entry.name
                && row.parent_id == entry.parent_id()
        }) {
            return Err(key_conflict(kind));
        }
        match rows.iter_mut().find(|row| row.id == entry.id) {
            Some(row) => {
                row.name = entry.name.clone();
                row.parent_id = entry.parent_id();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, kind: LinkedKind, id: Uuid) -> Result<bool> {
        let mut tables = self.store.tables().write().await;
        let rows = tables.linked_mut(kind);
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self, kind: LinkedKind) -> Result<u64> {
        let tables = self.store.tables().read().await;
        Ok(tables.linked(kind).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use rigdex_model::{DictionaryEntry, DictionaryKind};

    use super::*;
    use crate::database::infrastructure::memory::InMemoryDictionaryRepository;
    use crate::database::ports::dictionary::DictionaryRepository;

    async fn seeded() -> (
        InMemoryDictionaryRepository,
        InMemoryLinkedRepository,
        DictionaryEntry,
    ) {
        let store = MemoryStore::new();
        let sockets = InMemoryDictionaryRepository::new(store.clone());
        let chipsets = InMemoryLinkedRepository::new(store);
        let am5 = DictionaryEntry::new("AM5");
        sockets.insert(DictionaryKind::Socket, &am5).await.unwrap();
        (sockets, chipsets, am5)
    }

    #[tokio::test]
    async fn reads_resolve_the_parent() {
        let (_, chipsets, am5) = seeded().await;
        let x670e = LinkedEntry::new("X670E", am5.clone());
        chipsets.insert(LinkedKind::Chipset, &x670e).await.unwrap();

        let stored = chipsets
            .get(LinkedKind::Chipset, x670e.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.parent, am5);
    }

    #[tokio::test]
    async fn same_name_under_another_parent_is_allowed() {
        let (sockets, chipsets, am5) = seeded().await;
        let am4 = DictionaryEntry::new("AM4");
        sockets.insert(DictionaryKind::Socket, &am4).await.unwrap();

        chipsets
            .insert(LinkedKind::Chipset, &LinkedEntry::new("A620", am5.clone()))
            .await
            .unwrap();
        chipsets
            .insert(LinkedKind::Chipset, &LinkedEntry::new("A620", am4))
            .await
            .unwrap();
        let err = chipsets
            .insert(LinkedKind::Chipset, &LinkedEntry::new("A620", am5))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Conflict(_)));
        assert_eq!(chipsets.count(LinkedKind::Chipset).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn deleting_the_parent_cascades() {
        let (sockets, chipsets, am5) = seeded().await;
        chipsets
            .insert(LinkedKind::Chipset, &LinkedEntry::new("B650", am5.clone()))
            .await
            .unwrap();

        sockets.delete(DictionaryKind::Socket, am5.id).await.unwrap();

        assert_eq!(chipsets.count(LinkedKind::Chipset).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn designs_hang_off_vendors_not_sockets() {
        let (_, repo, am5) = seeded().await;
        let result = repo
            .insert(LinkedKind::Design, &LinkedEntry::new("ROG", am5))
            .await;

        assert!(matches!(result, Err(CatalogError::MissingReference(_))));
    }
}
