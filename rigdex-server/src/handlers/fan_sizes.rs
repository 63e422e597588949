use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use rigdex_core::api_routes::utils;
use rigdex_model::{FanSize, FanSizeDraft, Page};

use super::created;
use super::pagination::PageParams;
use crate::infra::{
    AppResult, AppState,
    extract::{EntityId, JsonBody, QueryParams},
};

pub const SEGMENT: &str = "fan-sizes";

pub async fn list_fan_sizes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FanSize>>> {
    Ok(Json(state.fan_sizes().list().await?))
}

pub async fn page_fan_sizes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<Page<FanSize>>> {
    let request = params.into_request()?;
    Ok(Json(state.fan_sizes().page(request).await?))
}

pub async fn get_fan_size(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<FanSize>> {
    Ok(Json(state.fan_sizes().get(id).await?))
}

pub async fn create_fan_size(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<FanSizeDraft>,
) -> AppResult<(StatusCode, HeaderMap, Json<FanSize>)> {
    let fan_size = state.fan_sizes().create(draft).await?;
    let headers = created(&utils::item(SEGMENT, fan_size.id));
    Ok((StatusCode::CREATED, headers, Json(fan_size)))
}

pub async fn replace_fan_size(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(draft): JsonBody<FanSizeDraft>,
) -> AppResult<Json<FanSize>> {
    Ok(Json(state.fan_sizes().replace(id, draft).await?))
}

pub async fn patch_fan_size(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(draft): JsonBody<FanSizeDraft>,
) -> AppResult<Json<FanSize>> {
    Ok(Json(state.fan_sizes().patch(id, draft).await?))
}

pub async fn delete_fan_size(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.fan_sizes().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
