//! tests/names/list.rs
//! GET /names returns the stored names in insertion order.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common;

#[tokio::test]
async fn empty_store_lists_no_names() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = reqwest::get(format!("{}/names", base_url))
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["code"], 200);
    assert_eq!(json["data"]["names"], json!([]));
    assert_eq!(json["data"]["count"], 0);
}

#[tokio::test]
async fn lists_names_in_insertion_order() {
    let base_url: String = common::spawn_app().await;
    let client: reqwest::Client = reqwest::Client::new();

    for name in ["Ada", "Grace", "Barbara"] {
        let resp: reqwest::Response = client
            .post(format!("{}/names", base_url))
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Failed to add name.");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp: reqwest::Response = client
        .get(format!("{}/names", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    let json: Value = common::json_body(resp).await;
    let names: Vec<&str> = json["data"]["names"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n: &Value| n["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Ada", "Grace", "Barbara"]);
    assert_eq!(json["data"]["count"], 3);
}
