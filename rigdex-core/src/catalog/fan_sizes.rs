use std::fmt;
use std::sync::Arc;

use rigdex_model::{FanDimension, FanSize, FanSizeDraft, Page, PageRequest};
use tracing::info;
use uuid::Uuid;

use super::validation::{
    FAN_SIZE_TYPE_NAME, check_dimension, entity_not_found, fan_size_taken,
    into_result, on_conflict,
};
use crate::database::ports::fan_sizes::FanSizeRepository;
use crate::error::{CatalogError, Result};

#[derive(Clone)]
pub struct FanSizeService {
    repo: Arc<dyn FanSizeRepository>,
}

impl fmt::Debug for FanSizeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanSizeService")
            .field("repo", &"Arc<dyn FanSizeRepository>")
            .finish()
    }
}

impl FanSizeService {
    pub fn new(repo: Arc<dyn FanSizeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<FanSize>> {
        self.repo.list().await
    }

    pub async fn page(&self, request: PageRequest) -> Result<Page<FanSize>> {
        self.repo.page(request).await
    }

    pub async fn get(&self, id: Uuid) -> Result<FanSize> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| entity_not_found(FAN_SIZE_TYPE_NAME, id))
    }

    pub async fn count(&self) -> Result<u64> {
        self.repo.count().await
    }

    pub async fn create(&self, draft: FanSizeDraft) -> Result<FanSize> {
        let (length, width, height) =
            self.validate(&draft, None, &FanDimension::ALL).await?;

        let fan_size = FanSize::new(length, width, height);
        self.repo
            .insert(&fan_size)
            .await
            .map_err(|err| conflict(&fan_size, err))?;

        info!(
            target: "catalog.write",
            kind = FAN_SIZE_TYPE_NAME,
            id = %fan_size.id,
            action = "create",
            "created fan size {}",
            fan_size
        );
        Ok(fan_size)
    }

    pub async fn replace(
        &self,
        id: Uuid,
        draft: FanSizeDraft,
    ) -> Result<FanSize> {
        let stored = self.get(id).await?;
        let (length, width, height) = self
            .validate(&draft, Some(stored.id), &FanDimension::ALL)
            .await?;

        self.store_update(
            FanSize {
                id: stored.id,
                length,
                width,
                height,
            },
            "replace",
        )
        .await
    }

    /// Only the supplied dimensions are checked; the rest come from the
    /// stored row.
    pub async fn patch(&self, id: Uuid, draft: FanSizeDraft) -> Result<FanSize> {
        let stored = self.get(id).await?;
        let supplied: Vec<FanDimension> = FanDimension::ALL
            .into_iter()
            .filter(|dimension| draft.get(*dimension).is_some())
            .collect();
        if supplied.is_empty() {
            return Ok(stored);
        }

        let merged = draft.merged_onto(&stored);
        let (length, width, height) =
            self.validate(&merged, Some(stored.id), &supplied).await?;

        self.store_update(
            FanSize {
                id: stored.id,
                length,
                width,
                height,
            },
            "patch",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.repo.delete(id).await? {
            info!(
                target: "catalog.write",
                kind = FAN_SIZE_TYPE_NAME,
                id = %id,
                action = "delete",
                "deleted fan size"
            );
        }
        Ok(())
    }

    async fn validate(
        &self,
        draft: &FanSizeDraft,
        current: Option<Uuid>,
        checked: &[FanDimension],
    ) -> Result<(i32, i32, i32)> {
        if let Some((length, width, height)) = draft.complete()
            && let Some(existing) =
                self.repo.find_by_dimensions(length, width, height).await?
            && Some(existing.id) != current
        {
            return Err(CatalogError::invalid(fan_size_taken(
                length, width, height,
            )));
        }

        let mut violations = Vec::new();
        for dimension in checked {
            check_dimension(*dimension, draft.get(*dimension), &mut violations);
        }
        into_result(violations)?;

        draft.complete().ok_or_else(|| {
            CatalogError::Internal(
                "fan size incomplete after validation".to_string(),
            )
        })
    }

    async fn store_update(
        &self,
        fan_size: FanSize,
        action: &'static str,
    ) -> Result<FanSize> {
        let updated = self
            .repo
            .update(&fan_size)
            .await
            .map_err(|err| conflict(&fan_size, err))?;
        if !updated {
            return Err(entity_not_found(FAN_SIZE_TYPE_NAME, fan_size.id));
        }

        info!(
            target: "catalog.write",
            kind = FAN_SIZE_TYPE_NAME,
            id = %fan_size.id,
            action,
            "updated fan size {}",
            fan_size
        );
        Ok(fan_size)
    }
}

fn conflict(fan_size: &FanSize, err: CatalogError) -> CatalogError {
    on_conflict(err, || {
        fan_size_taken(fan_size.length, fan_size.width, fan_size.height)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::infrastructure::memory::{
        InMemoryFanSizeRepository, MemoryStore,
    };
    use crate::error::Violation;

    fn service() -> FanSizeService {
        FanSizeService::new(Arc::new(InMemoryFanSizeRepository::new(
            MemoryStore::new(),
        )))
    }

    #[tokio::test]
    async fn create_then_duplicate() {
        let service = service();
        service.create(FanSizeDraft::new(120, 120, 25)).await.unwrap();

        let err = service
            .create(FanSizeDraft::new(120, 120, 25))
            .await
            .unwrap_err();
        assert_eq!(
            err.violations(),
            [Violation::new(
                ["length", "width", "height"],
                "Fan size 120x120x25 already exists!"
            )]
        );
    }

    #[tokio::test]
    async fn every_bad_dimension_is_reported() {
        let err = service()
            .create(FanSizeDraft {
                length: Some(-1),
                width: None,
                height: Some(25),
            })
            .await
            .unwrap_err();

        let params: Vec<_> = err
            .violations()
            .iter()
            .flat_map(|v| v.param_names.clone())
            .collect();
        assert_eq!(params, ["length", "width"]);
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_axis() {
        let service = service();
        let stored = service.create(FanSizeDraft::new(140, 140, 25)).await.unwrap();

        let patched = service
            .patch(
                stored.id,
                FanSizeDraft {
                    height: Some(15),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.dimensions(), (140, 140, 15));
        assert_eq!(service.get(stored.id).await.unwrap(), patched);
    }

    #[tokio::test]
    async fn patch_rejects_non_positive_supplied_axis() {
        let service = service();
        let stored = service.create(FanSizeDraft::new(92, 92, 25)).await.unwrap();

        let err = service
            .patch(
                stored.id,
                FanSizeDraft {
                    width: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.violations(),
            [Violation::new(["width"], "Width must be a positive number!")]
        );
    }

    #[tokio::test]
    async fn replace_unknown_id_is_not_found() {
        let id = Uuid::now_v7();
        let err = service()
            .replace(id, FanSizeDraft::new(80, 80, 25))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Fan size with ID = {id} not found!")
        );
    }

    #[tokio::test]
    async fn delete_shrinks_the_count_by_one() {
        let service = service();
        let keep = service.create(FanSizeDraft::new(200, 200, 30)).await.unwrap();
        let gone = service.create(FanSizeDraft::new(40, 40, 10)).await.unwrap();

        service.delete(gone.id).await.unwrap();
        service.delete(gone.id).await.unwrap();

        assert_eq!(service.count().await.unwrap(), 1);
        assert_eq!(service.list().await.unwrap(), vec![keep]);
    }
}
