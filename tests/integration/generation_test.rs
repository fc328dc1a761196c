// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::create_test_app;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_generate_music_is_idempotent_per_task_id() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/music/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "task_id": "m1" })),
        )
        .expect(1)
        .mount(&app.upstream)
        .await;

    let body = json!({ "prompt": "sunset", "genre": "pop", "task_id": "t1" });
    let first = app.server.post("/generate/music").json(&body).await;
    let second = app.server.post("/generate/music").json(&body).await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);
    let first: serde_json::Value = first.json();
    let second: serde_json::Value = second.json();
    assert_eq!(first["success"], true);
    assert_eq!(first["task_id"], "t1");
    assert_eq!(first["data"]["music_task_id"], "m1");
    assert_eq!(first["data"]["status"], "pending");
    assert_eq!(first["data"]["id"], second["data"]["id"]);
}

#[tokio::test]
async fn test_generate_music_assigns_task_id_when_missing() {
    let app = create_test_app().await;
    app.mock_music_submit("m1").await;

    let response = app
        .server
        .post("/generate/music")
        .json(&json!({ "prompt": "rain" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(!body["task_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_music_requires_prompt() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/generate/music")
        .json(&json!({ "genre": "pop" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_upstream_failure_leaves_no_record() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/music/generate"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/generate/music")
        .json(&json!({ "prompt": "sunset", "task_id": "t1" }))
        .await;
    assert_eq!(response.status_code(), 500);

    // 没有落库，轮询找不到任务
    let poll = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await;
    assert_eq!(poll.status_code(), 404);
}

#[tokio::test]
async fn test_merge_without_audio_is_rejected() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/video/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "request_id": "v1",
            "video_url": "https://cdn.test/v.mp4"
        })))
        .mount(&app.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/merge/merge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "s3_url": "x" })))
        .expect(0)
        .mount(&app.upstream)
        .await;

    let video = app
        .server
        .post("/generate/video")
        .json(&json!({ "prompt": "city", "task_id": "t1" }))
        .await;
    assert_eq!(video.status_code(), 200);

    let response = app
        .server
        .post("/generate/merge")
        .json(&json!({ "task_id": "t1" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("audio_url"));
}
