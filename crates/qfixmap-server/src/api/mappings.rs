use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use qfixmap_resolve::{AddedMapping, MappingKind, TableSnapshot};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AddMappingRequest {
    pub kind: String,
    pub from: String,
    pub to: String,
}

/// GET /api/v1/mappings — current table contents, seeded plus added rules.
pub(super) async fn list_mappings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<TableSnapshot>> {
    Json(ApiResponse {
        data: state.resolver.table().snapshot(),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// POST /api/v1/mappings — store a new rule; takes effect immediately.
pub(super) async fn add_mapping(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AddMappingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedMapping>>), ApiError> {
    let rid = &req_id.0;

    let kind: MappingKind = body
        .kind
        .parse()
        .map_err(|e: qfixmap_resolve::MappingError| {
            ApiError::new(rid, "validation_error", e.to_string())
        })?;

    let stored = state
        .resolver
        .table()
        .add_mapping(kind, &body.from, &body.to)
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: stored,
            meta: ResponseMeta::new(req_id.0.clone()),
        }),
    ))
}
