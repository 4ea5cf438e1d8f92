#![allow(clippy::unwrap_used)]
// Integration tests for `ConsoleClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apcon_api::{ConsoleClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ConsoleClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ConsoleClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .and(body_json(json!({ "login": "admin", "password": "test-password" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok123",
            "user": { "login": "admin", "role": "operator" }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "test-password".to_string().into();
    let resp = client.login("admin", &secret).await.unwrap();

    assert_eq!(resp.token.as_deref(), Some("tok123"));
    assert_eq!(
        resp.user.unwrap().get("role").and_then(|v| v.as_str()),
        Some("operator")
    );
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "bad credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong-password".to_string().into();
    let result = client.login("admin", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "bad credentials");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_change_password() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/password"))
        .and(body_json(json!({ "oldPassword": "old", "newPassword": "new" })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let old: secrecy::SecretString = "old".to_string().into();
    let new: secrecy::SecretString = "new".to_string().into();
    client.change_password(&old, &new).await.unwrap();
}

// ── Error contract tests ────────────────────────────────────────────

#[tokio::test]
async fn test_error_message_from_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/device/create"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "message": "device name already taken" })),
        )
        .mount(&server)
        .await;

    let device = apcon_api::models::NewDevice {
        name: "ap-lobby".into(),
        mac_address: "aa:bb:cc:dd:ee:ff".into(),
        description: String::new(),
        location: String::new(),
    };
    let result = client.create_device(&device).await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref details,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "device name already taken");
            assert!(details.is_some(), "raw body should be carried as details");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_message_falls_back_to_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device/get"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_devices().await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref details,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
            assert_eq!(details, &Some(serde_json::Value::String("boom".into())));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_detection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device/ap-missing/get"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "device not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_device("ap-missing").await.unwrap_err();
    assert!(err.is_not_found(), "404 should classify as not-found: {err:?}");
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/device/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "ap-lobby",
                "mac_address": "aa:bb:cc:dd:ee:ff",
                "description": "lobby ceiling",
                "location": "HQ",
                "status": "online"
            },
            {
                "name": "ap-warehouse",
                "mac_address": "11:22:33:44:55:66"
            }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name, "ap-lobby");
    assert_eq!(devices[0].status.as_deref(), Some("online"));
    assert_eq!(devices[1].mac_address, "11:22:33:44:55:66");
    assert!(devices[1].description.is_none());
}

#[tokio::test]
async fn test_delete_device() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/device/ap-lobby/delete"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_device("ap-lobby").await.unwrap();
}

// ── Configuration tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_save_and_fetch_config() {
    let (server, client) = setup().await;

    let document = json!({
        "system": [{ "config": "system", "section": "@system[0]", "values": { "hostname": "ap-lobby" } }],
        "wireless": [],
        "network": [],
        "firewall": [],
        "chilli": []
    });

    Mock::given(method("POST"))
        .and(path("/api/config/aa:bb:cc:dd:ee:ff/create"))
        .and(body_json(&document))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/config/aa:bb:cc:dd:ee:ff/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .mount(&server)
        .await;

    client
        .save_config("aa:bb:cc:dd:ee:ff", &document)
        .await
        .unwrap();

    let fetched = client.latest_config("aa:bb:cc:dd:ee:ff").await.unwrap();
    assert_eq!(fetched, document);
}

#[tokio::test]
async fn test_config_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/config/aa:bb:cc:dd:ee:ff/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "wireless": [] },
            { "wireless": [{ "config": "wireless", "section": "ap0_1a2b", "values": {} }] }
        ])))
        .mount(&server)
        .await;

    let history = client.all_configs("aa:bb:cc:dd:ee:ff").await.unwrap();
    assert_eq!(history.len(), 2);
}

// ── Portal tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_portal_profiles() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/portal/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "city-wifi",
                "uam_server": "https://portal.example.net/uam",
                "radius_server": "10.0.0.5",
                "radius_port": "1812"
            }
        ])))
        .mount(&server)
        .await;

    let profiles = client.portal_profiles().await.unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "city-wifi");
    assert_eq!(
        profiles[0].uam_server.as_deref(),
        Some("https://portal.example.net/uam")
    );
}
