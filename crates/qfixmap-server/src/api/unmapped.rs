use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use qfixmap_core::UnmappedEntry;
use qfixmap_resolve::taxonomy;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// The gaps report: what failed to resolve since startup, grouped by brand,
/// together with the valid target names needed to close each gap.
#[derive(Debug, Serialize)]
pub(super) struct UnmappedReport {
    pub brands: BTreeMap<String, Vec<UnmappedEntry>>,
    pub total_entries: usize,
    pub valid_clothing_types: Vec<&'static str>,
    pub valid_materials: Vec<&'static str>,
}

/// GET /api/v1/unmapped
pub(super) async fn unmapped_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<UnmappedReport>> {
    let tracker = state.resolver.unmapped();

    Json(ApiResponse {
        data: UnmappedReport {
            brands: tracker.by_brand(),
            total_entries: tracker.len(),
            valid_clothing_types: taxonomy::clothing_type_names(),
            valid_materials: taxonomy::material_names(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
