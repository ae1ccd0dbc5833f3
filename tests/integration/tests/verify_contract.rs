//! Integration test: the raw JSON contract of `POST /api/verify`.

use serde_json::{json, Value};
use ticketgate_integration_tests::spawn_builtin_node;

async fn post(base: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = resp.status().as_u16();
    (status, resp.json().await.expect("json body"))
}

#[tokio::test]
async fn test_contract_scenario() {
    let base = spawn_builtin_node().await;

    let (status, body) = post(&base, "/api/verify", json!({ "referenceId": "4234567890" })).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Registration verified successfully",
            "data": {
                "referenceId": "4234567890",
                "name": "Subham Karmakar",
                "username": "Subham K",
                "type": "Visitor",
                "eventName": "Techfest",
                "eventTime": "10:00 AM - 5:00 PM",
                "teamName": "Team Alpha",
                "day": "Day 1",
                "verified": true
            }
        })
    );

    let (status, body) = post(&base, "/api/verify", json!({ "referenceId": "4234567890" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Ticket already verified"));
    assert_eq!(body["error"], json!("ALREADY_VERIFIED"));
    assert_eq!(body["data"]["verified"], json!(true));

    let (status, body) = post(&base, "/api/verify", json!({ "referenceId": "000" })).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], json!("INVALID_REFERENCE_ID"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_missing_reference_id() {
    let base = spawn_builtin_node().await;

    let (status, body) = post(&base, "/api/verify", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Reference ID is required" }));

    let (status, _) = post(&base, "/api/verify", json!({ "referenceId": "" })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_versioned_route_shares_state() {
    let base = spawn_builtin_node().await;

    let (status, body) = post(&base, "/api/v1/verify", json!({ "referenceId": "4234567890" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));

    let (_, body) = post(&base, "/api/verify", json!({ "referenceId": "4234567890" })).await;
    assert_eq!(body["error"], json!("ALREADY_VERIFIED"));
}
