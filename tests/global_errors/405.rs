//! tests/global_errors/405.rs
//! A known path with an unsupported method returns 405 and keeps the Allow header.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_405_for_unsupported_method() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = reqwest::Client::new()
        .put(format!("{}/names", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let allow: String = resp.headers()["allow"].to_str().unwrap().to_string();
    assert!(allow.contains("GET"));
    assert!(allow.contains("POST"));

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["data"]["error"], "method_not_allowed");
}
