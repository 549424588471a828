//! tests/global_errors/415.rs
//! Posting a name without a JSON content type returns 415.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_415_without_json_content_type() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = reqwest::Client::new()
        .post(format!("{}/names", base_url))
        .header("content-type", "text/plain")
        .body("Ada")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(json["code"], 415);
}
