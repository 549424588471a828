//! tests/global_errors/413.rs
//! Ensures that a payload above MAX_REQUEST_BODY_SIZE triggers 413.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_413_when_payload_exceeds_limit() {
    let base_url: String = common::spawn_app_with(&[("MAX_REQUEST_BODY_SIZE", "1024")]).await;

    let oversized: String = format!(r#"{{"name": "{}"}}"#, "X".repeat(2048));

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/names", base_url))
        .header("content-type", "application/json")
        .body(oversized)
        .send()
        .await
        .expect("Failed to send large request.");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}
