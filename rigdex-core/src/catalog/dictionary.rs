use std::fmt;
use std::sync::Arc;

use rigdex_model::{
    DictionaryEntry, DictionaryKind, NamedDraft, Page, PageRequest,
};
use tracing::info;
use uuid::Uuid;

use super::validation::{
    check_name, entity_not_found, into_result, name_taken, normalize_name,
    on_conflict, usable_name,
};
use crate::database::ports::dictionary::DictionaryRepository;
use crate::error::{CatalogError, Result};

/// CRUD rules for the plain named lookup tables.
#[derive(Clone)]
pub struct DictionaryService {
    repo: Arc<dyn DictionaryRepository>,
}

impl fmt::Debug for DictionaryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryService")
            .field("repo", &"Arc<dyn DictionaryRepository>")
            .finish()
    }
}

impl DictionaryService {
    pub fn new(repo: Arc<dyn DictionaryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        kind: DictionaryKind,
    ) -> Result<Vec<DictionaryEntry>> {
        self.repo.list(kind).await
    }

    pub async fn page(
        &self,
        kind: DictionaryKind,
        request: PageRequest,
    ) -> Result<Page<DictionaryEntry>> {
        self.repo.page(kind, request).await
    }

    pub async fn get(
        &self,
        kind: DictionaryKind,
        id: Uuid,
    ) -> Result<DictionaryEntry> {
        self.repo
            .get(kind, id)
            .await?
            .ok_or_else(|| entity_not_found(kind.type_name(), id))
    }

    pub async fn count(&self, kind: DictionaryKind) -> Result<u64> {
        self.repo.count(kind).await
    }

    pub async fn create(
        &self,
        kind: DictionaryKind,
        draft: NamedDraft,
    ) -> Result<DictionaryEntry> {
        let name = self.validated_name(kind, draft.name.as_deref(), None).await?;

        let entry = DictionaryEntry::new(name);
        self.repo
            .insert(kind, &entry)
            .await
            .map_err(|err| conflict(kind, &entry.name, err))?;

        info!(
            target: "catalog.write",
            kind = %kind,
            id = %entry.id,
            action = "create",
            "created {} {}",
            kind,
            entry.name
        );
        Ok(entry)
    }

    /// Full replace: the name must be supplied.
    pub async fn replace(
        &self,
        kind: DictionaryKind,
        id: Uuid,
        draft: NamedDraft,
    ) -> Result<DictionaryEntry> {
        let stored = self.get(kind, id).await?;
        let name = self
            .validated_name(kind, draft.name.as_deref(), Some(stored.id))
            .await?;

        self.store_update(kind, DictionaryEntry { name, ..stored }, "replace")
            .await
    }

    /// Partial update: an absent name keeps the stored one.
    pub async fn patch(
        &self,
        kind: DictionaryKind,
        id: Uuid,
        draft: NamedDraft,
    ) -> Result<DictionaryEntry> {
        let stored = self.get(kind, id).await?;
        let Some(supplied) = draft.name.as_deref() else {
            return Ok(stored);
        };
        let name = self
            .validated_name(kind, Some(supplied), Some(stored.id))
            .await?;

        self.store_update(kind, DictionaryEntry { name, ..stored }, "patch")
            .await
    }

    /// Removing a missing row is not an error.
    pub async fn delete(&self, kind: DictionaryKind, id: Uuid) -> Result<()> {
        if self.repo.delete(kind, id).await? {
            info!(
                target: "catalog.write",
                kind = %kind,
                id = %id,
                action = "delete",
                "deleted {}",
                kind
            );
        }
        Ok(())
    }

    /// Uniqueness first, then field rules. `current` is excluded from the
    /// uniqueness lookup.
    async fn validated_name(
        &self,
        kind: DictionaryKind,
        raw: Option<&str>,
        current: Option<Uuid>,
    ) -> Result<String> {
        let name = normalize_name(raw);

        if let Some(candidate) = usable_name(name.as_deref())
            && let Some(existing) = self.repo.find_by_name(kind, candidate).await?
            && Some(existing.id) != current
        {
            return Err(CatalogError::invalid(name_taken(
                kind.type_name(),
                candidate,
            )));
        }

        let mut violations = Vec::new();
        check_name(name.as_deref(), &mut violations);
        into_result(violations)?;

        Ok(name.unwrap_or_default())
    }

    async fn store_update(
        &self,
        kind: DictionaryKind,
        entry: DictionaryEntry,
        action: &'static str,
    ) -> Result<DictionaryEntry> {
        let updated = self
            .repo
            .update(kind, &entry)
            .await
            .map_err(|err| conflict(kind, &entry.name, err))?;
        if !updated {
            return Err(entity_not_found(kind.type_name(), entry.id));
        }

        info!(
            target: "catalog.write",
            kind = %kind,
            id = %entry.id,
            action,
            "updated {} {}",
            kind,
            entry.name
        );
        Ok(entry)
    }
}

fn conflict(kind: DictionaryKind, name: &str, err: CatalogError) -> CatalogError {
    on_conflict(err, || name_taken(kind.type_name(), name))
}
