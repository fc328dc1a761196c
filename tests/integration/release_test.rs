// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::create_test_app;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn release_body(task_id: &str) -> serde_json::Value {
    json!({
        "tokenAddress": "MINT123",
        "title": "Sunset",
        "url": "https://cdn.test/merged.mp4",
        "walletAddress": "wallet1",
        "taskId": task_id,
        "tokenName": "Sunset Coin",
        "tokenSymbol": "SUN"
    })
}

#[tokio::test]
async fn test_release_requires_token_and_title() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/release")
        .json(&json!({ "url": "https://cdn.test/v.mp4" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_release_is_idempotent_per_task_id() {
    let app = create_test_app().await;

    let first = app.server.post("/release").json(&release_body("t1")).await;
    let second = app.server.post("/release").json(&release_body("t1")).await;

    assert_eq!(first.status_code(), 201);
    assert_eq!(second.status_code(), 201);
    let first: serde_json::Value = first.json();
    let second: serde_json::Value = second.json();
    assert_eq!(first["videoId"], second["videoId"]);
    assert_eq!(first["tokenId"], second["tokenId"]);
}

#[tokio::test]
async fn test_nft_is_not_found_before_mint() {
    let app = create_test_app().await;
    let release: serde_json::Value = app
        .server
        .post("/release")
        .json(&release_body("t1"))
        .await
        .json();

    let response = app
        .server
        .get("/nft")
        .add_query_param("video_id", release["videoId"].as_str().unwrap())
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_failed_mint_is_reported_as_gone() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/chain/v1/nft/mint"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": "insufficient_funds", "message": "insufficient lamports" }
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let release: serde_json::Value = app
        .server
        .post("/release")
        .json(&release_body("t1"))
        .await
        .json();
    assert_eq!(app.mint_worker.drain().await, 1);

    let response = app
        .server
        .get("/nft")
        .add_query_param("video_id", release["videoId"].as_str().unwrap())
        .await;

    assert_eq!(response.status_code(), 410);
}

#[tokio::test]
async fn test_release_without_wallet_skips_mint() {
    let app = create_test_app().await;
    let mut body = release_body("t1");
    body.as_object_mut().unwrap().remove("walletAddress");

    let response = app.server.post("/release").json(&body).await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(app.mint_worker.drain().await, 0);
}

#[tokio::test]
async fn test_nft_for_unknown_video_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/nft")
        .add_query_param("video_id", uuid::Uuid::new_v4().to_string())
        .await;

    assert_eq!(response.status_code(), 404);
}
