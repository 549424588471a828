//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns HTTP 404.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = common::json_body(resp).await;
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["error"], "route_not_found");
    assert_eq!(json["data"]["path"], "/does-not-exist");
}
