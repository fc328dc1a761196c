// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{create_test_app, create_test_app_with_secret};
use axum::body::Bytes;
use serde_json::json;
use tunemint::presentation::middleware::callback_signature::SIGNATURE_HEADER;
use tunemint::utils::signature;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const SECRET: &str = "callback-secret";

#[tokio::test]
async fn test_poll_music_returns_404_until_provider_is_ready() {
    let app = create_test_app().await;
    app.mock_music_submit("m1").await;
    Mock::given(method("GET"))
        .and(path("/music/status/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "processing" })))
        .up_to_n_times(1)
        .mount(&app.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/music/status/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": { "audio_url": "a.mp3", "image_url": "i.png" }
        })))
        .mount(&app.upstream)
        .await;

    app.server
        .post("/generate/music")
        .json(&json!({ "prompt": "sunset", "task_id": "t1" }))
        .await;

    let pending = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await;
    assert_eq!(pending.status_code(), 404);

    let ready = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await;
    assert_eq!(ready.status_code(), 200);
    let body: serde_json::Value = ready.json();
    assert_eq!(body["data"]["audio_url"], "a.mp3");
    assert_eq!(body["data"]["image_url"], "i.png");
}

#[tokio::test]
async fn test_provider_failure_is_reported_as_gone() {
    let app = create_test_app().await;
    app.mock_music_submit("m1").await;
    Mock::given(method("GET"))
        .and(path("/music/status/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "error": "content policy"
        })))
        .mount(&app.upstream)
        .await;

    app.server
        .post("/generate/music")
        .json(&json!({ "prompt": "sunset", "task_id": "t1" }))
        .await;

    let response = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await;

    assert_eq!(response.status_code(), 410);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("content policy"));
}

#[tokio::test]
async fn test_unsigned_callback_is_rejected_when_secret_configured() {
    let app = create_test_app_with_secret(Some(SECRET)).await;

    let response = app
        .server
        .post("/callback/music")
        .json(&json!({ "task_id": "t1", "callback_data": { "audio_url": "a.mp3" } }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_signed_callback_completes_music_task() {
    let app = create_test_app_with_secret(Some(SECRET)).await;
    app.mock_music_submit("m1").await;
    app.mock_music_pending().await;

    app.server
        .post("/generate/music")
        .json(&json!({ "prompt": "sunset", "task_id": "t1" }))
        .await;

    let payload = serde_json::to_vec(&json!({
        "task_id": "m1",
        "callback_data": { "data": [{ "audio_url": "a.mp3", "image_url": "i.png" }] }
    }))
    .unwrap();

    let forged = app
        .server
        .post("/callback/music")
        .content_type("application/json")
        .add_header(SIGNATURE_HEADER, signature::sign("wrong", &payload))
        .bytes(Bytes::from(payload.clone()))
        .await;
    assert_eq!(forged.status_code(), 401);

    let response = app
        .server
        .post("/callback/music")
        .content_type("application/json")
        .add_header(SIGNATURE_HEADER, signature::sign(SECRET, &payload))
        .bytes(Bytes::from(payload))
        .await;
    assert_eq!(response.status_code(), 200);
    let ack: serde_json::Value = response.json();
    assert_eq!(ack["task_id"], "t1");
    assert_eq!(ack["status"], "completed");

    // 轮询不需要签名，直接读取已落库的结果
    let poll = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await;
    assert_eq!(poll.status_code(), 200);
    let body: serde_json::Value = poll.json();
    assert_eq!(body["data"]["audio_url"], "a.mp3");
}

#[tokio::test]
async fn test_video_failure_callback_marks_task_failed() {
    let app = create_test_app().await;
    app.mock_video_submit("v1").await;
    app.mock_video_pending().await;

    app.server
        .post("/generate/video")
        .json(&json!({ "prompt": "city", "task_id": "t1" }))
        .await;

    let response = app
        .server
        .post("/callback/video")
        .json(&json!({ "task_id": "v1", "status": "failed", "error": "gpu timeout" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let ack: serde_json::Value = response.json();
    assert_eq!(ack["status"], "failed");

    let poll = app
        .server
        .get("/callback/video")
        .add_query_param("task_id", "t1")
        .await;
    assert_eq!(poll.status_code(), 410);
}

#[tokio::test]
async fn test_callback_for_unknown_task_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/callback/video")
        .json(&json!({ "task_id": "nope", "callback_data": { "video_url": "v.mp4" } }))
        .await;

    assert_eq!(response.status_code(), 404);
}
