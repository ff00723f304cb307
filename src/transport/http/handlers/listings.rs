use crate::transport::http::types::{
    AppState, LeaderboardResponse, MarketplaceResponse, SubscriptionsResponse, TasksResponse,
};
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/marketplace",
    responses((status = 200, description = "All marketplace items", body = MarketplaceResponse))
)]
pub async fn marketplace_handler(State(state): State<AppState>) -> Json<MarketplaceResponse> {
    Json(MarketplaceResponse {
        items: state.listings.marketplace().await,
    })
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    responses((status = 200, description = "All tasks", body = TasksResponse))
)]
pub async fn tasks_handler(State(state): State<AppState>) -> Json<TasksResponse> {
    Json(TasksResponse {
        tasks: state.listings.tasks().await,
    })
}

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses((status = 200, description = "All leaderboard entries", body = LeaderboardResponse))
)]
pub async fn leaderboard_handler(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    Json(LeaderboardResponse {
        leaderboard: state.listings.leaderboard().await,
    })
}

#[utoipa::path(
    get,
    path = "/api/subscriptions",
    responses((status = 200, description = "Subscription tiers", body = SubscriptionsResponse))
)]
pub async fn subscriptions_handler(State(state): State<AppState>) -> Json<SubscriptionsResponse> {
    Json(SubscriptionsResponse {
        subscriptions: state.listings.subscriptions().await,
    })
}
