use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use rigdex_core::api_routes::utils;
use rigdex_model::{DictionaryEntry, LinkedDraft, LinkedEntry, LinkedKind, Page};

use super::created;
use super::pagination::PageParams;
use crate::infra::{
    AppResult, AppState,
    extract::{EntityId, JsonBody, QueryParams},
};

/// Wire shapes of a linked resource. The parent is named after its kind
/// (`socketId` in, `socket` out for chipsets).
pub trait LinkedResource: Send + Sync + 'static {
    const KIND: LinkedKind;
    type Request: DeserializeOwned + Into<LinkedDraft> + Send;
    type Response: Serialize + From<LinkedEntry> + Send;
}

/// Parent reference as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: Uuid,
    pub name: String,
}

impl From<DictionaryEntry> for ParentRef {
    fn from(entry: DictionaryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}

#[derive(Debug)]
pub struct Chipsets;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipsetRequest {
    pub name: Option<String>,
    pub socket_id: Option<Uuid>,
}

impl From<ChipsetRequest> for LinkedDraft {
    fn from(request: ChipsetRequest) -> Self {
        LinkedDraft {
            name: request.name,
            parent_id: request.socket_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipsetResponse {
    pub id: Uuid,
    pub name: String,
    pub socket: ParentRef,
}

impl From<LinkedEntry> for ChipsetResponse {
    fn from(entry: LinkedEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            socket: entry.parent.into(),
        }
    }
}

impl LinkedResource for Chipsets {
    const KIND: LinkedKind = LinkedKind::Chipset;
    type Request = ChipsetRequest;
    type Response = ChipsetResponse;
}

#[derive(Debug)]
pub struct Designs;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub name: Option<String>,
    pub vendor_id: Option<Uuid>,
}

impl From<DesignRequest> for LinkedDraft {
    fn from(request: DesignRequest) -> Self {
        LinkedDraft {
            name: request.name,
            parent_id: request.vendor_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignResponse {
    pub id: Uuid,
    pub name: String,
    pub vendor: ParentRef,
}

impl From<LinkedEntry> for DesignResponse {
    fn from(entry: LinkedEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            vendor: entry.parent.into(),
        }
    }
}

impl LinkedResource for Designs {
    const KIND: LinkedKind = LinkedKind::Design;
    type Request = DesignRequest;
    type Response = DesignResponse;
}

pub async fn list_linked<R: LinkedResource>(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<R::Response>>> {
    let entries = state.linked().list(R::KIND).await?;
    Ok(Json(entries.into_iter().map(R::Response::from).collect()))
}

pub async fn page_linked<R: LinkedResource>(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<Page<R::Response>>> {
    let request = params.into_request()?;
    let page = state.linked().page(R::KIND, request).await?;
    Ok(Json(page.map(R::Response::from)))
}

pub async fn get_linked<R: LinkedResource>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<R::Response>> {
    let entry = state.linked().get(R::KIND, id).await?;
    Ok(Json(entry.into()))
}

pub async fn create_linked<R: LinkedResource>(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<R::Request>,
) -> AppResult<(StatusCode, HeaderMap, Json<R::Response>)> {
    let entry = state.linked().create(R::KIND, request.into()).await?;
    let headers = created(&utils::item(R::KIND.segment(), entry.id));
    Ok((StatusCode::CREATED, headers, Json(entry.into())))
}

pub async fn replace_linked<R: LinkedResource>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<R::Request>,
) -> AppResult<Json<R::Response>> {
    let entry = state.linked().replace(R::KIND, id, request.into()).await?;
    Ok(Json(entry.into()))
}

pub async fn patch_linked<R: LinkedResource>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<R::Request>,
) -> AppResult<Json<R::Response>> {
    let entry = state.linked().patch(R::KIND, id, request.into()).await?;
    Ok(Json(entry.into()))
}

pub async fn delete_linked<R: LinkedResource>(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<StatusCode> {
    state.linked().delete(R::KIND, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chipset_request_reads_socket_id() {
        let socket = Uuid::now_v7();
        let request: ChipsetRequest = serde_json::from_value(json!({
            "name": "B660",
            "socketId": socket,
        }))
        .unwrap();
        let draft: LinkedDraft = request.into();
        assert_eq!(draft, LinkedDraft::new("B660", socket));
    }

    #[test]
    fn design_response_nests_vendor() {
        let vendor = DictionaryEntry::new("NVIDIA");
        let entry = LinkedEntry::new("Founders Edition", vendor.clone());
        let json = serde_json::to_value(DesignResponse::from(entry.clone()))
            .unwrap();
        assert_eq!(
            json,
            json!({
                "id": entry.id,
                "name": "Founders Edition",
                "vendor": { "id": vendor.id, "name": "NVIDIA" },
            })
        );
    }
}
