use axum::{Extension, Json};
use serde::Deserialize;

use qfixmap_core::{MergedProductRecord, ProductRecord};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MergeRequest {
    pub scraper: Vec<ProductRecord>,
    pub protocol: Vec<ProductRecord>,
}

/// POST /api/v1/merge — reconcile a scraped catalog with protocol rows.
/// Output is scraper-driven and keeps scraper order.
pub(super) async fn merge_records(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<MergeRequest>,
) -> Json<ApiResponse<Vec<MergedProductRecord>>> {
    let records = qfixmap_merge::merge(&body.scraper, &body.protocol);

    Json(ApiResponse {
        data: records,
        meta: ResponseMeta::new(req_id.0),
    })
}
