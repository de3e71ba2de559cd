use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use qfixmap_core::ResolvedMapping;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ResolveRequest {
    #[serde(default)]
    pub clothing_type: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub brand: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ResolveData {
    pub qfix: ResolvedMapping,
}

/// POST /api/v1/resolve — resolve raw catalog attributes into the `qfix`
/// object. Misses are recorded, not rejected, so this always answers 200.
pub(super) async fn resolve_attributes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ResolveRequest>,
) -> Json<ApiResponse<ResolveData>> {
    let qfix = state
        .resolver
        .resolve(&body.clothing_type, &body.material, &body.gender, &body.brand);

    Json(ApiResponse {
        data: ResolveData { qfix },
        meta: ResponseMeta::new(req_id.0),
    })
}
