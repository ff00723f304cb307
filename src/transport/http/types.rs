use crate::app::{
    AnalyticsService, IdentityService, ListingService, NewWifiSource, ProvisionOrder, ProvisionOutcome,
    Session, SimRegistration, TelcoService,
};
use crate::crypto::TokenIssuer;
use crate::domain::model::{lenient, Sim, Subscription, UserProfile};
use crate::storage::DocumentStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub listings: ListingService,
    pub telco: TelcoService,
    pub analytics: AnalyticsService,
    /// Directory served for `/` and any path no API route claims.
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<DocumentStore>, jwt_secret: &str, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            identity: IdentityService::new(store.clone(), TokenIssuer::new(jwt_secret)),
            listings: ListingService::new(store.clone()),
            telco: TelcoService::new(store.clone()),
            analytics: AnalyticsService::new(store),
            public_dir: public_dir.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StatusResponse {
    pub ok: bool,
    /// Server time in epoch milliseconds.
    pub time: i64,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub token: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateAdminQuery {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InfoResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MarketplaceResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<JsonValue>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct TasksResponse {
    #[schema(value_type = Vec<Object>)]
    pub tasks: Vec<JsonValue>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LeaderboardResponse {
    #[schema(value_type = Vec<Object>)]
    pub leaderboard: Vec<JsonValue>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SubscriptionsResponse {
    pub subscriptions: Vec<Subscription>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterSimRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub msisdn: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub operator: Option<String>,
    #[serde(default, rename = "ownerEmail", deserialize_with = "lenient::opt_string")]
    pub owner_email: Option<String>,
}

impl From<RegisterSimRequest> for SimRegistration {
    fn from(req: RegisterSimRequest) -> Self {
        Self {
            msisdn: req.msisdn,
            operator: req.operator,
            owner_email: req.owner_email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SimResponse {
    pub sim: Sim,
}

#[derive(Deserialize, Debug)]
pub struct AdminQuery {
    #[serde(default)]
    pub admin: Option<String>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct WifiSourceRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ssid: Option<String>,
    /// Each bundle is `{ "code": ..., "mb": ... }`, stored as given. A single non-array value
    /// is stored as a one-element list.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub bundles: JsonValue,
}

impl From<WifiSourceRequest> for NewWifiSource {
    fn from(req: WifiSourceRequest) -> Self {
        Self {
            name: req.name,
            ssid: req.ssid,
            bundles: match req.bundles {
                JsonValue::Array(items) => items,
                JsonValue::Null => Vec::new(),
                other => vec![other],
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct BundlesResponse {
    pub source: String,
    #[schema(value_type = Vec<Object>)]
    pub bundles: Vec<JsonValue>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct ProvisionRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub msisdn: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub bundle_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub wifi_id: Option<String>,
    #[serde(default, rename = "ownerEmail", deserialize_with = "lenient::opt_string")]
    pub owner_email: Option<String>,
}

impl From<ProvisionRequest> for ProvisionOrder {
    fn from(req: ProvisionRequest) -> Self {
        Self {
            msisdn: req.msisdn,
            bundle_code: req.bundle_code,
            wifi_id: req.wifi_id,
            owner_email: req.owner_email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProvisionResponse {
    pub success: bool,
    /// Always true: no real provider is contacted.
    pub simulated: bool,
    pub added_mb: u64,
    /// `null` when no registered user matched `ownerEmail`.
    pub new_balance: Option<i64>,
}

impl From<ProvisionOutcome> for ProvisionResponse {
    fn from(outcome: ProvisionOutcome) -> Self {
        Self {
            success: true,
            simulated: true,
            added_mb: outcome.added_mb,
            new_balance: outcome.new_balance,
        }
    }
}
