use crate::app::ServiceError;
use crate::transport::http::handlers::common::parse_body;
use crate::transport::http::types::{
    AppState, CreateAdminQuery, ErrorBody, LoginRequest, MessageResponse, RegisterRequest, SessionResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = SessionResponse),
        (status = 400, description = "`missing` email/password, email `exists`, or `invalid_json` body", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ServiceError> {
    let req = parse_body(request)?;
    let session = state
        .identity
        .register(req.name.as_deref(), req.email.as_deref(), req.password.as_deref())
        .await?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = SessionResponse),
        (status = 400, description = "`invalid` credentials or `invalid_json` body", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ServiceError> {
    let req = parse_body(request)?;
    let session = state
        .identity
        .login(req.email.as_deref(), req.password.as_deref())
        .await?;
    Ok(Json(session.into()))
}

/// Convenience endpoint, deliberately unauthenticated.
#[utoipa::path(
    get,
    path = "/api/create-admin",
    params(("email" = Option<String>, Query, description = "Email of the user to promote")),
    responses(
        (status = 200, description = "User promoted", body = MessageResponse),
        (status = 400, description = "`missing_email`", body = ErrorBody),
        (status = 404, description = "`user_not_found`", body = ErrorBody)
    )
)]
pub async fn create_admin_handler(
    State(state): State<AppState>,
    Query(query): Query<CreateAdminQuery>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let message = state.identity.promote_admin(query.email.as_deref()).await?;
    Ok(Json(MessageResponse { ok: true, message }))
}
