//! tests/names/create.rs
//! POST /names validates, trims and stores names once.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common;

async fn post_name(base_url: &str, name: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/names", base_url))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn creates_a_trimmed_name() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = post_name(&base_url, "  Ada Lovelace  ").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "CREATED");
    assert_eq!(json["code"], 201);
    assert_eq!(json["data"]["name"], "Ada Lovelace");
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["created_at"].is_string());
    assert_eq!(json["messages"][0], "Name added successfully");
}

#[tokio::test]
async fn rejects_a_duplicate_with_409() {
    let base_url: String = common::spawn_app().await;

    assert_eq!(post_name(&base_url, "Grace").await.status(), StatusCode::CREATED);

    let resp: reqwest::Response = post_name(&base_url, " Grace ").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "CONFLICT");
    assert_eq!(json["data"]["error"], "name_already_exists");
}

#[tokio::test]
async fn rejects_blank_and_oversized_names() {
    let base_url: String = common::spawn_app().await;

    let blank: reqwest::Response = post_name(&base_url, "   ").await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    let json: Value = common::json_body(blank).await;
    assert_eq!(json["data"]["error"], "name cannot be empty");

    let long: String = "x".repeat(101);
    let oversized: reqwest::Response = post_name(&base_url, &long).await;
    assert_eq!(oversized.status(), StatusCode::BAD_REQUEST);
    let json: Value = common::json_body(oversized).await;
    assert_eq!(json["data"]["error"], "name cannot exceed 100 characters");

    let listed: Value = common::json_body(
        reqwest::get(format!("{}/names", base_url)).await.unwrap(),
    )
    .await;
    assert_eq!(listed["data"]["count"], 0);
}
