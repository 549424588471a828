//! tests/names/by_id.rs
//! GET and DELETE /names/{id}.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common;

#[tokio::test]
async fn fetches_and_deletes_a_name() {
    let base_url: String = common::spawn_app().await;
    let client: reqwest::Client = reqwest::Client::new();

    let created: Value = common::json_body(
        client
            .post(format!("{}/names", base_url))
            .json(&json!({ "name": "Edsger" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    let id: String = created["data"]["id"].as_str().unwrap().to_string();

    let fetched: reqwest::Response = client
        .get(format!("{}/names/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(common::json_body(fetched).await["data"]["name"], "Edsger");

    let deleted: reqwest::Response = client
        .delete(format!("{}/names/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone: reqwest::Response = client
        .get(format!("{}/names/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let json: Value = common::json_body(gone).await;
    assert_eq!(json["data"]["error"], "name_not_found");
    assert_eq!(json["data"]["id"], id.as_str());
}

#[tokio::test]
async fn deleting_an_unknown_id_is_404() {
    let base_url: String = common::spawn_app().await;

    let resp: reqwest::Response = reqwest::Client::new()
        .delete(format!("{}/names/{}", base_url, uuid::Uuid::new_v4()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn a_deleted_name_can_be_added_again() {
    let base_url: String = common::spawn_app().await;
    let client: reqwest::Client = reqwest::Client::new();

    let created: Value = common::json_body(
        client
            .post(format!("{}/names", base_url))
            .json(&json!({ "name": "Alan" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    let id: &str = created["data"]["id"].as_str().unwrap();

    client.delete(format!("{}/names/{}", base_url, id)).send().await.unwrap();

    let again: reqwest::Response = client
        .post(format!("{}/names", base_url))
        .json(&json!({ "name": "Alan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CREATED);
}
