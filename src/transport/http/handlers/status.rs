use crate::app::ServiceError;
use crate::transport::http::types::{AppState, ErrorBody, InfoResponse, StatusResponse};
use axum::extract::State;
use axum::Json;
use chrono::Utc;

const GOOGLE_OAUTH_NOTICE: &str =
    "Use full Google OAuth by enabling passport and SESSION in production. Visit the README for setup.";

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service is up; the visit counter was incremented", body = StatusResponse),
        (status = 500, description = "Document could not be written", body = ErrorBody)
    )
)]
pub async fn status_handler(State(state): State<AppState>) -> Result<Json<StatusResponse>, ServiceError> {
    state.analytics.record_visit().await?;
    Ok(Json(StatusResponse {
        ok: true,
        time: Utc::now().timestamp_millis(),
    }))
}

/// OAuth is not implemented; this only explains how it would be enabled.
#[utoipa::path(
    get,
    path = "/auth/google",
    responses((status = 200, description = "Informational notice", body = InfoResponse))
)]
pub async fn google_auth_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: GOOGLE_OAUTH_NOTICE.to_string(),
    })
}
