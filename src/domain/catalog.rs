//! Fixed offerings: the SIM bundle catalog, the default subscription tiers, and the rules that
//! resolve a requested bundle code to a data quantity.

use serde_json::Value as JsonValue;

use crate::domain::model::{lenient, Bundle, Subscription, WifiSource};

/// Data credited when a bundle cannot be resolved, or resolves to a bundle without a size.
pub const DEFAULT_BUNDLE_MB: u64 = 100;

const SIM_BUNDLES: [(&str, &str, u64); 3] = [
    ("SIM-100MB", "100MB", 100),
    ("SIM-1GB", "1GB", 1024),
    ("SIM-5GB", "5GB", 5120),
];

/// The three built-in SIM data bundles, in catalog order.
pub fn sim_bundles() -> Vec<Bundle> {
    SIM_BUNDLES
        .iter()
        .map(|(code, label, mb)| Bundle::new(code, *mb).with_label(label))
        .collect()
}

pub fn default_subscriptions() -> Vec<Subscription> {
    [("sub_basic", "Basic", 0u64), ("sub_pro", "Pro", 299), ("sub_premium", "Premium", 499)]
        .into_iter()
        .map(|(id, name, price)| Subscription {
            id: id.to_string(),
            name: name.to_string(),
            price: JsonValue::from(price),
        })
        .collect()
}

/// Resolves a code against the fixed SIM catalog. Unknown codes synthesize a
/// [`DEFAULT_BUNDLE_MB`] bundle carrying the requested code.
pub fn resolve_sim_bundle(code: Option<&str>) -> Bundle {
    SIM_BUNDLES
        .iter()
        .find(|(c, _, _)| Some(*c) == code)
        .map(|(c, _, mb)| Bundle::new(c, *mb))
        .unwrap_or_else(|| Bundle {
            code: code.map(str::to_string),
            label: None,
            mb: DEFAULT_BUNDLE_MB,
        })
}

/// `code` of a stored WiFi bundle, read as text.
pub fn bundle_code(bundle: &JsonValue) -> Option<String> {
    bundle.get("code").and_then(lenient::text)
}

/// `mb` of a stored WiFi bundle; numeric strings count.
pub fn bundle_mb(bundle: &JsonValue) -> Option<u64> {
    bundle.get("mb").and_then(lenient::unsigned)
}

/// Megabytes offered by the bundle `code` of `source`.
///
/// A missing source, a missing bundle, or a bundle whose `mb` is absent, unreadable or zero all
/// yield [`DEFAULT_BUNDLE_MB`].
pub fn resolve_wifi_bundle_mb(source: Option<&WifiSource>, code: Option<&str>) -> u64 {
    source
        .and_then(|w| w.bundles.iter().find(|b| bundle_code(b).as_deref() == code))
        .and_then(bundle_mb)
        .filter(|mb| *mb > 0)
        .unwrap_or(DEFAULT_BUNDLE_MB)
}

/// The fixed SIM catalog followed by every WiFi source's bundles, source by source. WiFi bundles
/// are returned exactly as stored.
pub fn all_bundles(wifi_sources: &[WifiSource]) -> Vec<JsonValue> {
    let mut bundles: Vec<JsonValue> = sim_bundles().iter().map(Bundle::to_json).collect();
    bundles.extend(wifi_sources.iter().flat_map(|w| w.bundles.iter().cloned()));
    bundles
}
