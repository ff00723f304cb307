//! End-to-end HTTP checks: serve the router on an ephemeral port and talk to it with reqwest.

use freenethub_backend::transport;
use freenethub_backend::DocumentStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    store: Arc<DocumentStore>,
    client: reqwest::Client,
    _dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

async fn start_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    let public_dir = dir.path().join("public");
    transport::http::write_landing_page(&public_dir).await.unwrap();

    let store = Arc::new(DocumentStore::new(dir.path().join("db.json")));
    store.init().await.unwrap();
    let state = transport::http::AppState::new(store.clone(), "test_secret", public_dir);
    let router = transport::http::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        store,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}

#[tokio::test]
async fn status_counts_visits() {
    let server = start_server().await;

    for _ in 0..3 {
        let (code, body) = server.get("/api/status").await;
        assert_eq!(code, 200);
        assert_eq!(body["ok"], true);
        assert!(body["time"].as_i64().unwrap() > 0);
    }
    assert_eq!(server.store.load().await.analytics.visits, 3);
}

#[tokio::test]
async fn register_login_and_promote_over_http() {
    let server = start_server().await;

    let (code, body) = server
        .post(
            "/api/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }),
        )
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["data_balance_mb"], 0);
    assert!(body["user"]["referralCode"].as_str().unwrap().starts_with("REF"));
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().is_some());

    let (code, body) = server
        .post("/api/register", json!({ "email": "ada@example.com", "password": "x" }))
        .await;
    assert_eq!((code, body), (400, json!({ "error": "exists" })));

    let (code, body) = server.post("/api/register", json!({ "email": "bob@example.com" })).await;
    assert_eq!((code, body), (400, json!({ "error": "missing" })));

    let (code, body) = server
        .post("/api/login", json!({ "email": "ada@example.com", "password": "pw" }))
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["user"]["name"], "Ada");

    let (code, body) = server
        .post("/api/login", json!({ "email": "ada@example.com", "password": "nope" }))
        .await;
    assert_eq!((code, body), (400, json!({ "error": "invalid" })));

    let (code, body) = server.get("/api/create-admin").await;
    assert_eq!((code, body), (400, json!({ "error": "missing_email" })));

    let (code, body) = server.get("/api/create-admin?email=ghost@example.com").await;
    assert_eq!((code, body), (404, json!({ "error": "user_not_found" })));

    let (code, body) = server.get("/api/create-admin?email=ada@example.com").await;
    assert_eq!(code, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "User ada@example.com promoted to admin.");
    assert!(server.store.load().await.users[0].is_admin);
}

#[tokio::test]
async fn empty_body_is_reported_as_missing() {
    let server = start_server().await;
    let resp = server
        .client
        .post(server.url("/api/register"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "error": "missing" }));
}

#[tokio::test]
async fn listings_dump_collections() {
    let server = start_server().await;
    server
        .store
        .update(|doc| {
            doc.marketplace.push(json!({ "id": "m1", "title": "Router" }));
            doc.tasks.push(json!({ "id": "t1" }));
            Ok::<_, freenethub_backend::storage::StoreError>(())
        })
        .await
        .unwrap();

    let (_, body) = server.get("/api/marketplace").await;
    assert_eq!(body, json!({ "items": [{ "id": "m1", "title": "Router" }] }));
    let (_, body) = server.get("/api/tasks").await;
    assert_eq!(body, json!({ "tasks": [{ "id": "t1" }] }));
    let (_, body) = server.get("/api/leaderboard").await;
    assert_eq!(body, json!({ "leaderboard": [] }));
    let (_, body) = server.get("/api/subscriptions").await;
    assert_eq!(
        body,
        json!({ "subscriptions": [
            { "id": "sub_basic", "name": "Basic", "price": 0 },
            { "id": "sub_pro", "name": "Pro", "price": 299 },
            { "id": "sub_premium", "name": "Premium", "price": 499 }
        ] })
    );
}

#[tokio::test]
async fn telco_flow_over_http() {
    let server = start_server().await;
    server
        .post("/api/register", json!({ "email": "ada@example.com", "password": "pw" }))
        .await;

    let (code, body) = server.post("/api/telco/register-sim", json!({ "operator": "x" })).await;
    assert_eq!((code, body), (400, json!({ "error": "missing" })));

    let (code, body) = server
        .post(
            "/api/telco/register-sim",
            json!({ "msisdn": "0700", "ownerEmail": "ada@example.com" }),
        )
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["sim"]["msisdn"], "0700");
    assert_eq!(body["sim"]["operator"], "unknown");
    assert_eq!(body["sim"]["ownerEmail"], "ada@example.com");

    let wifi = json!({ "name": "Cafe", "ssid": "cafe", "bundles": [{ "code": "W-500", "mb": 500 }] });
    let (code, body) = server.post("/api/admin/wifi-source", wifi.clone()).await;
    assert_eq!((code, body), (403, json!({ "error": "forbidden" })));

    let (code, source) = server.post("/api/admin/wifi-source?admin=1", wifi).await;
    assert_eq!(code, 200);
    assert_eq!(source["ssid"], "cafe");
    let wifi_id = source["id"].as_str().unwrap().to_string();

    let (code, body) = server.get("/api/telco/bundles").await;
    assert_eq!(code, 200);
    assert_eq!(body["source"], "local");
    assert_eq!(body["bundles"][0], json!({ "code": "SIM-100MB", "label": "100MB", "mb": 100 }));
    assert_eq!(body["bundles"][3], json!({ "code": "W-500", "mb": 500 }));
    assert_eq!(body["bundles"].as_array().unwrap().len(), 4);

    let (code, body) = server
        .post(
            "/api/telco/provision",
            json!({ "wifi_id": wifi_id, "bundle_code": "W-500", "ownerEmail": "ada@example.com" }),
        )
        .await;
    assert_eq!(code, 200);
    assert_eq!(
        body,
        json!({ "success": true, "simulated": true, "added_mb": 500, "new_balance": 500 })
    );

    let (code, body) = server
        .post("/api/telco/provision", json!({ "msisdn": "0700", "bundle_code": "???" }))
        .await;
    assert_eq!(code, 200);
    assert_eq!(
        body,
        json!({ "success": true, "simulated": true, "added_mb": 100, "new_balance": null })
    );

    let (code, body) = server.post("/api/telco/provision", json!({ "bundle_code": "SIM-1GB" })).await;
    assert_eq!((code, body), (400, json!({ "error": "missing" })));

    assert_eq!(server.store.load().await.transactions.len(), 2);
}

#[tokio::test]
async fn wifi_bundles_are_stored_as_submitted() {
    let server = start_server().await;
    server
        .post("/api/register", json!({ "email": "ada@example.com", "password": "pw" }))
        .await;

    let bundles = json!([{ "code": "W-500", "mb": "500", "label": "half a gig" }]);
    let (code, source) = server
        .post(
            "/api/admin/wifi-source?admin=1",
            json!({ "name": "Cafe", "ssid": 42, "bundles": bundles }),
        )
        .await;
    assert_eq!(code, 200);
    assert_eq!(source["name"], "Cafe");
    assert_eq!(source["ssid"], "42");
    assert_eq!(source["bundles"], bundles);
    assert_eq!(server.store.load().await.wifi_sources[0].bundles, bundles.as_array().unwrap().clone());

    let (code, body) = server
        .post(
            "/api/telco/provision",
            json!({ "wifi_id": source["id"], "bundle_code": "W-500", "ownerEmail": "ada@example.com" }),
        )
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["added_mb"], 500);
    assert_eq!(body["new_balance"], 500);
}

#[tokio::test]
async fn numeric_identifiers_are_read_as_text() {
    let server = start_server().await;

    let (code, body) = server
        .post("/api/telco/register-sim", json!({ "msisdn": 254700000001u64 }))
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["sim"]["msisdn"], "254700000001");

    let (code, body) = server
        .post("/api/telco/provision", json!({ "msisdn": 254700000001u64, "bundle_code": "SIM-1GB" }))
        .await;
    assert_eq!(code, 200);
    assert_eq!(body["added_mb"], 1024);

    let doc = server.store.load().await;
    assert_eq!(doc.transactions[0].msisdn.as_deref(), Some("254700000001"));
}

#[tokio::test]
async fn malformed_body_is_rejected_and_stores_nothing() {
    let server = start_server().await;
    let bad = json!({ "name": { "nested": true }, "bundles": [] });

    let (code, body) = server.post("/api/admin/wifi-source", bad.clone()).await;
    assert_eq!((code, body), (403, json!({ "error": "forbidden" })));

    let (code, body) = server.post("/api/admin/wifi-source?admin=1", bad).await;
    assert_eq!((code, body), (400, json!({ "error": "invalid_json" })));

    let resp = server
        .client
        .post(server.url("/api/telco/register-sim"))
        .header("content-type", "application/json")
        .body("{ \"msisdn\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "error": "invalid_json" }));

    let doc = server.store.load().await;
    assert!(doc.wifi_sources.is_empty());
    assert!(doc.sims.is_empty());
}

#[tokio::test]
async fn landing_page_and_oauth_notice() {
    let server = start_server().await;

    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.text().await.unwrap().contains("FreeNetHub Backend v3"));

    let (code, body) = server.get("/auth/google").await;
    assert_eq!(code, 200);
    assert!(body["message"].as_str().unwrap().contains("Google OAuth"));
}
