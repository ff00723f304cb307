//! Simulated telecom provisioning: SIM registry, admin-registered WiFi sources, the bundle
//! catalog, and crediting data to a user's balance.
//!
//! No external provider is ever contacted. Every provisioning call is logged as a transaction
//! before anything is resolved, and nothing is rolled back.

use crate::app::{present, ServiceError};
use crate::domain::catalog::{all_bundles, resolve_sim_bundle, resolve_wifi_bundle_mb};
use crate::domain::model::{Sim, Transaction, WifiSource};
use crate::infra::ids::generate_id;
use crate::storage::DocumentStore;
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::info;

const UNKNOWN_OPERATOR: &str = "unknown";
/// Query value that unlocks admin-only telco routes.
pub const ADMIN_FLAG: &str = "1";

#[derive(Debug, Clone, Default)]
pub struct SimRegistration {
    pub msisdn: Option<String>,
    pub operator: Option<String>,
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewWifiSource {
    pub name: Option<String>,
    pub ssid: Option<String>,
    /// Stored as submitted.
    pub bundles: Vec<JsonValue>,
}

#[derive(Debug, Clone, Default)]
pub struct ProvisionOrder {
    pub msisdn: Option<String>,
    pub bundle_code: Option<String>,
    pub wifi_id: Option<String>,
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionOutcome {
    pub added_mb: u64,
    /// Balance after crediting, or `None` when no user matched the owner email.
    pub new_balance: Option<i64>,
}

/// Fails with [`ServiceError::Forbidden`] unless `admin_flag` is [`ADMIN_FLAG`].
pub fn check_admin_flag(admin_flag: Option<&str>) -> Result<(), ServiceError> {
    if admin_flag == Some(ADMIN_FLAG) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

#[derive(Clone)]
pub struct TelcoService {
    store: Arc<DocumentStore>,
}

impl TelcoService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the SIM for `msisdn`, creating it on first sight. Later calls return the stored
    /// record unchanged, whatever operator or owner they pass.
    pub async fn register_sim(&self, req: SimRegistration) -> Result<Sim, ServiceError> {
        let msisdn = present(req.msisdn.as_deref()).ok_or(ServiceError::Validation("missing"))?;

        self.store
            .update(|doc| {
                if let Some(existing) = doc.find_sim(msisdn) {
                    return Ok(existing.clone());
                }
                let sim = Sim {
                    id: generate_id(),
                    msisdn: msisdn.to_string(),
                    operator: present(req.operator.as_deref())
                        .unwrap_or(UNKNOWN_OPERATOR)
                        .to_string(),
                    owner_email: present(req.owner_email.as_deref()).map(str::to_string),
                    bundles: Vec::new(),
                };
                info!(sim_id = %sim.id, msisdn, "sim registered");
                doc.sims.push(sim.clone());
                Ok(sim)
            })
            .await
    }

    /// Appends a WiFi source. `admin_flag` must equal [`ADMIN_FLAG`]; nothing else is validated.
    pub async fn register_wifi_source(
        &self,
        admin_flag: Option<&str>,
        req: NewWifiSource,
    ) -> Result<WifiSource, ServiceError> {
        check_admin_flag(admin_flag)?;

        let source = WifiSource {
            id: generate_id(),
            name: req.name,
            ssid: req.ssid,
            bundles: req.bundles,
        };
        let stored = source.clone();
        self.store
            .update(move |doc| {
                doc.wifi_sources.push(stored);
                Ok::<_, ServiceError>(())
            })
            .await?;

        info!(wifi_id = %source.id, bundles = source.bundles.len(), "wifi source registered");
        Ok(source)
    }

    /// Fixed SIM catalog followed by every WiFi source's bundles.
    pub async fn list_bundles(&self) -> Vec<JsonValue> {
        all_bundles(&self.store.load().await.wifi_sources)
    }

    /// Simulates buying a bundle and credits the owner's data balance.
    ///
    /// The transaction record is appended first and always says `credited: 0`, whether or not
    /// a bundle or user resolves afterwards.
    pub async fn provision(&self, order: ProvisionOrder) -> Result<ProvisionOutcome, ServiceError> {
        let msisdn = present(order.msisdn.as_deref());
        let wifi_id = present(order.wifi_id.as_deref());
        let bundle_code = order.bundle_code.as_deref();
        let owner_email = present(order.owner_email.as_deref());

        if msisdn.is_none() && wifi_id.is_none() {
            return Err(ServiceError::Validation("missing"));
        }

        let outcome = self
            .store
            .update(|doc| {
                doc.transactions.push(Transaction {
                    id: generate_id(),
                    provider: "telco".to_string(),
                    kind: "provision".to_string(),
                    external_order_id: format!("prov_{}", Utc::now().timestamp_millis()),
                    msisdn: msisdn.map(str::to_string),
                    wifi_id: wifi_id.map(str::to_string),
                    bundle_code: bundle_code.map(str::to_string),
                    credited: 0,
                    raw_payload: json!({ "requested": true }),
                });

                let added_mb = match wifi_id {
                    Some(id) => resolve_wifi_bundle_mb(doc.find_wifi_source(id), bundle_code),
                    None => resolve_sim_bundle(bundle_code).mb,
                };

                let new_balance = owner_email
                    .and_then(|email| doc.find_user_mut(email))
                    .map(|user| {
                        let added = i64::try_from(added_mb).unwrap_or(i64::MAX);
                        user.data_balance_mb = user.data_balance_mb.saturating_add(added);
                        user.data_balance_mb
                    });

                Ok::<_, ServiceError>(ProvisionOutcome {
                    added_mb,
                    new_balance,
                })
            })
            .await?;

        info!(
            msisdn = msisdn.unwrap_or_default(),
            wifi_id = wifi_id.unwrap_or_default(),
            added_mb = outcome.added_mb,
            credited_user = outcome.new_balance.is_some(),
            "provisioning simulated"
        );
        Ok(outcome)
    }
}
