use std::fmt;
use std::sync::Arc;

use rigdex_model::{
    DictionaryEntry, LinkedDraft, LinkedEntry, LinkedKind, Page, PageRequest,
};
use tracing::info;
use uuid::Uuid;

use super::validation::{
    check_name, entity_not_found, into_result, linked_name_taken,
    missing_reference, normalize_name, on_conflict, reference_not_found,
    usable_name,
};
use crate::database::ports::dictionary::DictionaryRepository;
use crate::database::ports::linked::LinkedRepository;
use crate::error::{CatalogError, Result};

/// CRUD rules for rows that belong to a dictionary parent.
///
/// Checks run in a fixed order: the addressed row, then the referenced
/// parent, then the `(name, parent)` key, then the individual fields.
#[derive(Clone)]
pub struct LinkedService {
    repo: Arc<dyn LinkedRepository>,
    parents: Arc<dyn DictionaryRepository>,
}

impl fmt::Debug for LinkedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedService")
            .field("repo", &"Arc<dyn LinkedRepository>")
            .field("parents", &"Arc<dyn DictionaryRepository>")
            .finish()
    }
}

/// Merged values about to be checked and written.
struct Candidate {
    name: Option<String>,
    parent: Option<DictionaryEntry>,
}

impl LinkedService {
    pub fn new(
        repo: Arc<dyn LinkedRepository>,
        parents: Arc<dyn DictionaryRepository>,
    ) -> Self {
        Self { repo, parents }
    }

    pub async fn list(&self, kind: LinkedKind) -> Result<Vec<LinkedEntry>> {
        self.repo.list(kind).await
    }

    pub async fn page(
        &self,
        kind: LinkedKind,
        request: PageRequest,
    ) -> Result<Page<LinkedEntry>> {
        self.repo.page(kind, request).await
    }

    pub async fn get(&self, kind: LinkedKind, id: Uuid) -> Result<LinkedEntry> {
        self.repo
            .get(kind, id)
            .await?
            .ok_or_else(|| entity_not_found(kind.type_name(), id))
    }

    pub async fn count(&self, kind: LinkedKind) -> Result<u64> {
        self.repo.count(kind).await
    }

    pub async fn create(
        &self,
        kind: LinkedKind,
        draft: LinkedDraft,
    ) -> Result<LinkedEntry> {
        let candidate = Candidate {
            name: normalize_name(draft.name.as_deref()),
            parent: self.resolve_parent(kind, draft.parent_id).await?,
        };
        let (name, parent) = self.validate(kind, candidate, None, true).await?;

        let entry = LinkedEntry::new(name, parent);
        self.repo
            .insert(kind, &entry)
            .await
            .map_err(|err| conflict(kind, &entry, err))?;

        info!(
            target: "catalog.write",
            kind = %kind,
            id = %entry.id,
            parent_id = %entry.parent_id(),
            action = "create",
            "created {} {}",
            kind,
            entry.name
        );
        Ok(entry)
    }

    /// Full replace: name and parent must both be supplied.
    pub async fn replace(
        &self,
        kind: LinkedKind,
        id: Uuid,
        draft: LinkedDraft,
    ) -> Result<LinkedEntry> {
        let stored = self.get(kind, id).await?;
        let candidate = Candidate {
            name: normalize_name(draft.name.as_deref()),
            parent: self.resolve_parent(kind, draft.parent_id).await?,
        };
        let (name, parent) = self
            .validate(kind, candidate, Some(stored.id), true)
            .await?;

        self.store_update(kind, LinkedEntry { name, parent, ..stored }, "replace")
            .await
    }

    /// Partial update: absent fields keep their stored values and are not
    /// re-validated.
    pub async fn patch(
        &self,
        kind: LinkedKind,
        id: Uuid,
        draft: LinkedDraft,
    ) -> Result<LinkedEntry> {
        let stored = self.get(kind, id).await?;
        if draft.name.is_none() && draft.parent_id.is_none() {
            return Ok(stored);
        }

        let name = match draft.name.as_deref() {
            Some(name) => normalize_name(Some(name)),
            None => Some(stored.name.clone()),
        };
        let parent = match draft.parent_id {
            Some(_) => self.resolve_parent(kind, draft.parent_id).await?,
            None => Some(stored.parent.clone()),
        };
        let name_supplied = draft.name.is_some();
        let (name, parent) = self
            .validate(
                kind,
                Candidate { name, parent },
                Some(stored.id),
                name_supplied,
            )
            .await?;

        self.store_update(kind, LinkedEntry { name, parent, ..stored }, "patch")
            .await
    }

    /// Removing a missing row is not an error.
    pub async fn delete(&self, kind: LinkedKind, id: Uuid) -> Result<()> {
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

    /// Look up the referenced parent, failing with a 404-style violation on
    /// `["id"]` when it does not exist.
    async fn resolve_parent(
        &self,
        kind: LinkedKind,
        parent_id: Option<Uuid>,
    ) -> Result<Option<DictionaryEntry>> {
        let Some(parent_id) = parent_id else {
            return Ok(None);
        };
        let parent_kind = kind.parent();
        self.parents
            .get(parent_kind, parent_id)
            .await?
            .map(Some)
            .ok_or_else(|| reference_not_found(parent_kind.type_name(), parent_id))
    }

    async fn validate(
        &self,
        kind: LinkedKind,
        candidate: Candidate,
        current: Option<Uuid>,
        check_name_field: bool,
    ) -> Result<(String, DictionaryEntry)> {
        if let Some(name) = usable_name(candidate.name.as_deref())
            && let Some(parent) = candidate.parent.as_ref()
            && let Some(existing) = self
                .repo
                .find_by_name_and_parent(kind, name, parent.id)
                .await?
            && Some(existing.id) != current
        {
            return Err(CatalogError::invalid(linked_name_taken(
                kind,
                name,
                &parent.name,
            )));
        }

        let mut violations = Vec::new();
        if check_name_field {
            check_name(candidate.name.as_deref(), &mut violations);
        }
        if candidate.parent.is_none() {
            violations.push(missing_reference(kind));
        }
        into_result(violations)?;

        match (candidate.name, candidate.parent) {
            (Some(name), Some(parent)) => Ok((name, parent)),
            _ => Err(CatalogError::Internal(format!(
                "{} candidate incomplete after validation",
                kind
            ))),
        }
    }

    async fn store_update(
        &self,
        kind: LinkedKind,
        entry: LinkedEntry,
        action: &'static str,
    ) -> Result<LinkedEntry> {
        let updated = self
            .repo
            .update(kind, &entry)
            .await
            .map_err(|err| conflict(kind, &entry, err))?;
        if !updated {
            return Err(entity_not_found(kind.type_name(), entry.id));
        }

        info!(
            target: "catalog.write",
            kind = %kind,
            id = %entry.id,
            parent_id = %entry.parent_id(),
            action,
            "updated {} {}",
            kind,
            entry.name
        );
        Ok(entry)
    }
}

/// Map storage constraint failures to the violations the pre-checks report.
/// A parent deleted after it was resolved surfaces as a foreign key failure.
fn conflict(kind: LinkedKind, entry: &LinkedEntry, err: CatalogError) -> CatalogError {
    match err {
        CatalogError::MissingReference(_) => {
            reference_not_found(kind.parent().type_name(), entry.parent_id())
        }
        other => on_conflict(other, || {
            linked_name_taken(kind, &entry.name, &entry.parent.name)
        }),
    }
}
