use crate::domain::model::{Sim, Subscription, UserProfile, WifiSource};
use crate::transport::http::handlers::{identity, listings, status, telco};
use crate::transport::http::types::{
    AppState, BundlesResponse, ErrorBody, InfoResponse, LeaderboardResponse, LoginRequest,
    MarketplaceResponse, MessageResponse, ProvisionRequest, ProvisionResponse, RegisterRequest,
    RegisterSimRequest, SessionResponse, SimResponse, StatusResponse, SubscriptionsResponse,
    TasksResponse, WifiSourceRequest,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status::status_handler,
        status::google_auth_handler,
        identity::register_handler,
        identity::login_handler,
        identity::create_admin_handler,
        listings::marketplace_handler,
        listings::tasks_handler,
        listings::leaderboard_handler,
        listings::subscriptions_handler,
        telco::register_sim_handler,
        telco::wifi_source_handler,
        telco::bundles_handler,
        telco::provision_handler
    ),
    components(schemas(
        ErrorBody,
        StatusResponse,
        InfoResponse,
        RegisterRequest,
        LoginRequest,
        SessionResponse,
        UserProfile,
        MessageResponse,
        MarketplaceResponse,
        TasksResponse,
        LeaderboardResponse,
        SubscriptionsResponse,
        Subscription,
        RegisterSimRequest,
        SimResponse,
        Sim,
        WifiSourceRequest,
        WifiSource,
        BundlesResponse,
        ProvisionRequest,
        ProvisionResponse
    ))
)]
pub struct ApiDoc;

/// API routes, with the static directory as fallback for everything else.
pub fn create_router(app_state: AppState) -> Router {
    let static_files = ServeDir::new(&app_state.public_dir);
    Router::new()
        .route("/api/status", get(status::status_handler))
        .route("/auth/google", get(status::google_auth_handler))
        .route("/api/register", post(identity::register_handler))
        .route("/api/login", post(identity::login_handler))
        .route("/api/create-admin", get(identity::create_admin_handler))
        .route("/api/marketplace", get(listings::marketplace_handler))
        .route("/api/tasks", get(listings::tasks_handler))
        .route("/api/leaderboard", get(listings::leaderboard_handler))
        .route("/api/subscriptions", get(listings::subscriptions_handler))
        .route("/api/telco/register-sim", post(telco::register_sim_handler))
        .route("/api/admin/wifi-source", post(telco::wifi_source_handler))
        .route("/api/telco/bundles", get(telco::bundles_handler))
        .route("/api/telco/provision", post(telco::provision_handler))
        .fallback_service(static_files)
        .with_state(app_state)
}
