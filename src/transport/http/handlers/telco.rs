use crate::app::telco_service::check_admin_flag;
use crate::app::ServiceError;
use crate::domain::model::WifiSource;
use crate::transport::http::handlers::common::parse_body;
use crate::transport::http::types::{
    AdminQuery, AppState, BundlesResponse, ErrorBody, ProvisionRequest, ProvisionResponse,
    RegisterSimRequest, SimResponse, WifiSourceRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/telco/register-sim",
    request_body = RegisterSimRequest,
    responses(
        (status = 200, description = "Existing or newly created SIM", body = SimResponse),
        (status = 400, description = "`missing` msisdn or `invalid_json` body", body = ErrorBody)
    )
)]
pub async fn register_sim_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterSimRequest>, JsonRejection>,
) -> Result<Json<SimResponse>, ServiceError> {
    let req = parse_body(request)?;
    let sim = state.telco.register_sim(req.into()).await?;
    Ok(Json(SimResponse { sim }))
}

#[utoipa::path(
    post,
    path = "/api/admin/wifi-source",
    params(("admin" = Option<String>, Query, description = "Must be `1`")),
    request_body = WifiSourceRequest,
    responses(
        (status = 200, description = "Stored WiFi source", body = WifiSource),
        (status = 400, description = "`invalid_json` body", body = ErrorBody),
        (status = 403, description = "`forbidden`", body = ErrorBody)
    )
)]
pub async fn wifi_source_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
    request: Result<Json<WifiSourceRequest>, JsonRejection>,
) -> Result<Json<WifiSource>, ServiceError> {
    check_admin_flag(query.admin.as_deref())?;
    let req = parse_body(request)?;
    let source = state
        .telco
        .register_wifi_source(query.admin.as_deref(), req.into())
        .await?;
    Ok(Json(source))
}

#[utoipa::path(
    get,
    path = "/api/telco/bundles",
    responses((status = 200, description = "SIM catalog followed by WiFi bundles", body = BundlesResponse))
)]
pub async fn bundles_handler(State(state): State<AppState>) -> Json<BundlesResponse> {
    Json(BundlesResponse {
        source: "local".to_string(),
        bundles: state.telco.list_bundles().await,
    })
}

#[utoipa::path(
    post,
    path = "/api/telco/provision",
    request_body = ProvisionRequest,
    responses(
        (status = 200, description = "Simulated provisioning result", body = ProvisionResponse),
        (status = 400, description = "`missing` msisdn and wifi_id, or `invalid_json` body", body = ErrorBody)
    )
)]
pub async fn provision_handler(
    State(state): State<AppState>,
    request: Result<Json<ProvisionRequest>, JsonRejection>,
) -> Result<Json<ProvisionResponse>, ServiceError> {
    let req = parse_body(request)?;
    let outcome = state.telco.provision(req.into()).await?;
    Ok(Json(outcome.into()))
}
