//! The persisted root document and the records it holds.
//!
//! Records are read loosely: missing fields take their defaults, `null` collections read as
//! empty, and scalars go through [`lenient`](super::lenient). Values the service never does
//! arithmetic on (`credits`, subscription `price`, WiFi bundles) are kept as raw JSON. A file
//! that still does not fit this shape is refused by the store rather than overwritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;

use super::lenient;
use crate::domain::catalog::default_subscriptions;

/// The single JSON aggregate holding every collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub users: Vec<User>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub marketplace: Vec<JsonValue>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub tasks: Vec<JsonValue>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub transactions: Vec<Transaction>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub leaderboard: Vec<JsonValue>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub analytics: Analytics,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub sims: Vec<Sim>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub wifi_sources: Vec<WifiSource>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub subscriptions: Vec<Subscription>,
    /// Top-level keys this service does not know about; written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Document {
    /// Applies startup defaults: an empty subscription list gets the fixed tiers.
    pub fn with_defaults(mut self) -> Self {
        if self.subscriptions.is_empty() {
            self.subscriptions = default_subscriptions();
        }
        self
    }

    pub fn find_user(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_user_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.email == email)
    }

    pub fn find_sim(&self, msisdn: &str) -> Option<&Sim> {
        self.sims.iter().find(|s| s.msisdn == msisdn)
    }

    pub fn find_wifi_source(&self, id: &str) -> Option<&WifiSource> {
        self.wifi_sources.iter().find(|w| w.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    /// bcrypt hash, never the plaintext.
    #[serde(deserialize_with = "lenient::string")]
    pub password: String,
    /// Never computed on here, so stored exactly as found.
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    pub credits: JsonValue,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_admin: bool,
    #[serde(rename = "referralCode", deserialize_with = "lenient::string")]
    pub referral_code: String,
    #[serde(deserialize_with = "lenient::int")]
    pub data_balance_mb: i64,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            credits: self.credits.clone(),
            referral_code: self.referral_code.clone(),
            data_balance_mb: self.data_balance_mb,
        }
    }
}

/// Public projection of a [`User`] (no password hash, no admin flag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    #[schema(value_type = f64)]
    pub credits: JsonValue,
    #[serde(rename = "referralCode")]
    pub referral_code: String,
    pub data_balance_mb: i64,
}

/// Append-only record of a provisioning attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub provider: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub external_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub msisdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub wifi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub bundle_code: Option<String>,
    #[serde(deserialize_with = "lenient::uint")]
    pub credited: u64,
    pub raw_payload: JsonValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default, deserialize_with = "lenient::uint")]
    pub visits: u64,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Sim {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub msisdn: String,
    #[serde(deserialize_with = "lenient::string")]
    pub operator: String,
    #[serde(rename = "ownerEmail", deserialize_with = "lenient::opt_string")]
    pub owner_email: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    #[schema(value_type = Vec<Object>)]
    pub bundles: Vec<JsonValue>,
}

/// An admin-registered bundle provider. Bundles are stored exactly as submitted; `code` and
/// `mb` are read out of them leniently when provisioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WifiSource {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub ssid: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    #[schema(value_type = Vec<Object>)]
    pub bundles: Vec<JsonValue>,
}

/// An entry of the fixed SIM catalog, or one synthesized for an unknown code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub mb: u64,
}

impl Bundle {
    pub fn new(code: &str, mb: u64) -> Self {
        Self {
            code: Some(code.to_string()),
            label: None,
            mb,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        if let Some(code) = &self.code {
            obj.insert("code".to_string(), JsonValue::from(code.as_str()));
        }
        if let Some(label) = &self.label {
            obj.insert("label".to_string(), JsonValue::from(label.as_str()));
        }
        obj.insert("mb".to_string(), JsonValue::from(self.mb));
        JsonValue::Object(obj)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Subscription {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    #[schema(value_type = u64)]
    pub price: JsonValue,
}
