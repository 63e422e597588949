//! Handlers shared by every plain named resource.
//!
//! The router mounts one copy per [`DictionaryKind`] and hands the kind to
//! the handlers through an [`Extension`].

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::debug;

use rigdex_core::api_routes::utils;
use rigdex_model::{DictionaryEntry, DictionaryKind, NamedDraft, Page};

use super::created;
use super::pagination::PageParams;
use crate::infra::{
    AppResult, AppState,
    extract::{EntityId, JsonBody, QueryParams},
};

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
) -> AppResult<Json<Vec<DictionaryEntry>>> {
    let entries = state.dictionaries().list(kind).await?;
    debug!(kind = %kind, count = entries.len(), "listed entries");
    Ok(Json(entries))
}

pub async fn page_entries(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<Page<DictionaryEntry>>> {
    let request = params.into_request()?;
    Ok(Json(state.dictionaries().page(kind, request).await?))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    EntityId(id): EntityId,
) -> AppResult<Json<DictionaryEntry>> {
    Ok(Json(state.dictionaries().get(kind, id).await?))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    JsonBody(draft): JsonBody<NamedDraft>,
) -> AppResult<(StatusCode, HeaderMap, Json<DictionaryEntry>)> {
    let entry = state.dictionaries().create(kind, draft).await?;
    let headers = created(&utils::item(kind.segment(), entry.id));
    Ok((StatusCode::CREATED, headers, Json(entry)))
}

pub async fn replace_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    EntityId(id): EntityId,
    JsonBody(draft): JsonBody<NamedDraft>,
) -> AppResult<Json<DictionaryEntry>> {
    Ok(Json(state.dictionaries().replace(kind, id, draft).await?))
}

pub async fn patch_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    EntityId(id): EntityId,
    JsonBody(draft): JsonBody<NamedDraft>,
) -> AppResult<Json<DictionaryEntry>> {
    Ok(Json(state.dictionaries().patch(kind, id, draft).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<DictionaryKind>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.dictionaries().delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
