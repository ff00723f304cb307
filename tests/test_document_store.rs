//! Document store behavior: defaults, tolerance of bad files, refusal of incompatible ones, and
//! the write race.

use freenethub_backend::crypto::TokenIssuer;
use freenethub_backend::storage::{DocumentStore, StoreError};
use freenethub_backend::{IdentityService, ServiceError};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> DocumentStore {
    DocumentStore::new(dir.path().join("db.json"))
}

#[tokio::test]
async fn missing_file_loads_as_empty_document_with_default_tiers() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let doc = store.load().await;
    assert!(doc.users.is_empty());
    assert!(doc.transactions.is_empty());
    assert_eq!(doc.analytics.visits, 0);
    let ids: Vec<_> = doc.subscriptions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["sub_basic", "sub_pro", "sub_premium"]);
    assert!(!store.path().exists(), "load must not create the file");
}

#[tokio::test]
async fn malformed_file_is_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), b"{ this is not json").unwrap();

    let doc = store.load().await;
    assert!(doc.users.is_empty());
    assert_eq!(doc.subscriptions.len(), 3);
}

#[tokio::test]
async fn init_materializes_defaults_and_keeps_existing_data() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        br#"{ "marketplace": [{ "sku": "m1" }], "custom": 42 }"#,
    )
    .unwrap();

    store.init().await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    assert_eq!(raw["marketplace"][0]["sku"], "m1");
    assert_eq!(raw["custom"], 42);
    assert_eq!(raw["subscriptions"].as_array().unwrap().len(), 3);
    assert!(raw["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failed_mutation_does_not_touch_the_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.init().await.unwrap();
    let before = std::fs::read(store.path()).unwrap();

    #[derive(Debug)]
    struct Refused;
    impl From<StoreError> for Refused {
        fn from(_: StoreError) -> Self {
            Refused
        }
    }

    let result = store
        .update(|doc| {
            doc.analytics.visits = 99;
            Err::<(), _>(Refused)
        })
        .await;
    assert!(result.is_err());
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[tokio::test]
async fn unserialized_load_save_pairs_lose_an_update() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.init().await.unwrap();

    // Two requests each take their own snapshot before either writes.
    let mut first = store.load().await;
    let mut second = store.load().await;
    first.analytics.visits += 1;
    second.analytics.visits += 1;
    store.save(&first).await.unwrap();
    store.save(&second).await.unwrap();

    // Two increments happened, the later save wins.
    assert_eq!(store.load().await.analytics.visits, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn update_serializes_concurrent_writers() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir));
    store.init().await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .update(|doc| {
                    doc.analytics.visits += 1;
                    Ok::<_, StoreError>(())
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.load().await.analytics.visits, 25);
}

fn read_raw(store: &DocumentStore) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap()
}

#[tokio::test]
async fn loosely_typed_records_survive_a_registration() -> Result<(), ServiceError> {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir));
    std::fs::write(
        store.path(),
        serde_json::to_vec(&json!({
            "users": [{
                "id": "u1",
                "name": "Old",
                "email": "old@x",
                "password": "$2b$08$hash",
                "credits": 1.5,
                "is_admin": false,
                "referralCode": "REFOLD001",
                "data_balance_mb": 7
            }],
            "subscriptions": [{ "id": "sub_x", "name": "X" }]
        }))
        .unwrap(),
    )
    .unwrap();

    let identity = IdentityService::new(store.clone(), TokenIssuer::new("test_secret"));
    identity.register(Some("New"), Some("new@x"), Some("pw")).await?;

    let raw = read_raw(&store);
    let emails: Vec<_> = raw["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(emails, ["old@x", "new@x"]);
    assert_eq!(raw["users"][0]["credits"], 1.5);
    assert_eq!(raw["users"][0]["data_balance_mb"], 7);
    assert_eq!(raw["subscriptions"], json!([{ "id": "sub_x", "name": "X" }]));
    Ok(())
}

#[tokio::test]
async fn negative_balance_is_kept() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        br#"{ "users": [{ "email": "debt@x", "data_balance_mb": -20 }] }"#,
    )
    .unwrap();

    store.init().await.unwrap();
    assert_eq!(read_raw(&store)["users"][0]["data_balance_mb"], -20);
}

#[tokio::test]
async fn incompatible_document_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let original = br#"{ "users": "everyone", "marketplace": [{ "sku": "m1" }] }"#;
    std::fs::write(store.path(), original).unwrap();

    let result = store
        .update(|doc| {
            doc.analytics.visits += 1;
            Ok::<_, StoreError>(())
        })
        .await;
    assert!(matches!(result, Err(StoreError::Incompatible { .. })), "got {result:?}");
    assert!(matches!(store.init().await, Err(StoreError::Incompatible { .. })));
    assert_eq!(std::fs::read(store.path()).unwrap(), original);

    // Readers still get something to serve.
    assert!(store.load().await.users.is_empty());
}
