mod mappings;
mod merge;
mod resolve;
mod unmapped;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use qfixmap_resolve::Resolver;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/resolve", post(resolve::resolve_attributes))
        .route("/api/v1/merge", post(merge::merge_records))
        .route("/api/v1/unmapped", get(unmapped::unmapped_report))
        .route(
            "/api/v1/mappings",
            get(mappings::list_mappings).post(mappings::add_mapping),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            service: "qfixmap",
            version: env!("CARGO_PKG_VERSION"),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Window size comes from `QFIXMAP_RATE_LIMIT_RPM`; unset or unparsable
/// values fall back to 120 requests per minute.
pub fn default_rate_limit_state() -> RateLimitState {
    let per_minute = std::env::var("QFIXMAP_RATE_LIMIT_RPM")
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(120);
    RateLimitState::new(per_minute, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use qfixmap_core::gender::{Gender, GenderVocabulary};
    use qfixmap_core::DEFAULT_BASE_URL;
    use qfixmap_resolve::{MappingTable, UnmappedTracker};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let resolver = Arc::new(Resolver::new(
            Arc::new(MappingTable::seeded()),
            Arc::new(UnmappedTracker::new()),
            GenderVocabulary::builtin(),
            DEFAULT_BASE_URL,
            Some(Gender::Women),
        ));
        let auth = crate::middleware::AuthState::from_env(true).expect("auth");
        build_app(AppState { resolver }, auth, default_rate_limit_state())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "mystery", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_service_identity() {
        let response = test_app()
            .oneshot(get_request("/api/v1/health"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert_eq!(json["data"]["service"].as_str(), Some("qfixmap"));
        assert!(json["meta"]["request_id"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[tokio::test]
    async fn resolve_returns_qfix_object_for_known_row() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/resolve",
                r#"{"clothing_type":"Dam > Jeans","material":"99% Bomull, 1% Elastan","gender":"dam","brand":"kappahl"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let qfix = &json["data"]["qfix"];
        assert_eq!(qfix["qfix_clothing_type"].as_str(), Some("Trousers"));
        assert_eq!(qfix["qfix_clothing_type_id"].as_i64(), Some(174));
        assert_eq!(qfix["qfix_material_id"].as_i64(), Some(69));
        assert_eq!(qfix["qfix_subcategory_id"].as_i64(), Some(55));
        assert_eq!(
            qfix["qfix_url"].as_str(),
            Some("https://kappahl.dev.qfixr.me/sv/?category_id=174&material_id=69")
        );
    }

    #[tokio::test]
    async fn resolve_miss_shows_up_in_unmapped_report() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/resolve",
                r#"{"clothing_type":"coatsjackets > kappor","brand":"ginatricot"}"#,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["data"]["qfix"]["qfix_clothing_type"].is_null());

        let response = app
            .oneshot(get_request("/api/v1/unmapped"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let entries = json["data"]["brands"]["ginatricot"]
            .as_array()
            .expect("ginatricot entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0]["raw_value"].as_str(),
            Some("coatsjackets > kappor")
        );
        assert_eq!(entries[0]["occurrence_count"].as_u64(), Some(1));
        assert!(json["data"]["valid_clothing_types"]
            .as_array()
            .is_some_and(|names| !names.is_empty()));
    }

    #[tokio::test]
    async fn add_mapping_rejects_unknown_target_with_valid_list() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/mappings",
                r#"{"kind":"clothing_type","from":"ytterplagg","to":"Jacketz"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
        let message = json["error"]["message"].as_str().expect("message");
        assert!(message.contains("Jacketz"));
        assert!(message.contains("Jacket"), "message lists valid targets");
    }

    #[tokio::test]
    async fn add_mapping_rejects_unknown_kind() {
        let response = test_app()
            .oneshot(post_json(
                "/api/v1/mappings",
                r#"{"kind":"color","from":"blue","to":"Jacket"}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
    }

    #[tokio::test]
    async fn added_mapping_is_used_by_subsequent_resolves() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/mappings",
                r#"{"kind":"clothing_type","from":"ytterplagg","to":"Jacket"}"#,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["target_category"].as_str(), Some("Jacket"));

        let response = app
            .oneshot(post_json(
                "/api/v1/resolve",
                r#"{"clothing_type":"Ytterplagg","brand":"kappahl"}"#,
            ))
            .await
            .expect("response");
        let json = json_body(response).await;
        assert_eq!(
            json["data"]["qfix"]["qfix_clothing_type"].as_str(),
            Some("Jacket")
        );
        assert_eq!(json["data"]["qfix"]["qfix_clothing_type_id"].as_i64(), Some(173));
    }

    #[tokio::test]
    async fn list_mappings_returns_seeded_table() {
        let response = test_app()
            .oneshot(get_request("/api/v1/mappings"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["data"]["clothing_types"]
            .as_array()
            .is_some_and(|rules| !rules.is_empty()));
        assert!(json["data"]["materials"]
            .as_array()
            .is_some_and(|rules| !rules.is_empty()));
    }

    #[tokio::test]
    async fn merge_combines_records_by_normalized_name() {
        let body = r#"{
            "scraper": [{
                "identity_key": "123456",
                "name": "Slim jeans",
                "clothing_type": "Dam > Jeans",
                "material_composition": "99% Bomull, 1% Elastan",
                "description": "Slim jeans i stretchig denim.",
                "gender_category": "dam"
            }],
            "protocol": [{
                "identity_key": "7340000000017",
                "name": "slim jeans",
                "description": "Slim fit jeans in stretch denim.",
                "care_text": "Machine wash 40C",
                "country_of_origin": "Bangladesh"
            }]
        }"#;

        let response = test_app()
            .oneshot(post_json("/api/v1/merge", body))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let records = json["data"].as_array().expect("data array");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["merge_status"].as_str(), Some("merged"));
        assert_eq!(records[0]["description"].as_str(), Some("Slim jeans i stretchig denim."));
        assert_eq!(records[0]["care_text"].as_str(), Some("Machine wash 40C"));
        assert_eq!(
            records[0]["protocol_identity_key"].as_str(),
            Some("7340000000017")
        );
    }

    #[tokio::test]
    async fn merged_record_fields_resolve_like_catalog_rows() {
        let app = test_app();

        let body = r#"{
            "scraper": [{
                "identity_key": "123456",
                "name": "Slim jeans",
                "clothing_type": "Dam > Jeans",
                "material_composition": "99% Bomull, 1% Elastan",
                "description": "Slim jeans i stretchig denim.",
                "gender_category": "dam"
            }],
            "protocol": [{
                "identity_key": "7340000000017",
                "name": "slim jeans",
                "description": "Slim fit jeans in stretch denim.",
                "care_text": "Machine wash 40C",
                "country_of_origin": "Bangladesh"
            }]
        }"#;
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/merge", body))
            .await
            .expect("response");
        let json = json_body(response).await;
        let record = &json["data"][0];

        let resolve_body = serde_json::json!({
            "clothing_type": record["clothing_type"],
            "material": record["material_composition"],
            "gender": record["gender_category"],
            "brand": "kappahl",
        });
        let response = app
            .oneshot(post_json("/api/v1/resolve", &resolve_body.to_string()))
            .await
            .expect("response");
        let json = json_body(response).await;
        assert_eq!(
            json["data"]["qfix"]["qfix_clothing_type_id"].as_i64(),
            Some(174)
        );
        assert_eq!(json["data"]["qfix"]["qfix_material_id"].as_i64(), Some(69));
    }
}
