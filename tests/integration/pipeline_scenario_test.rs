// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::create_test_app;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// 音乐 → 视频 → 合并 → 发布 → 铸造，全程只经过 HTTP 与铸造工作器
#[tokio::test]
async fn test_full_pipeline_mints_nft_for_released_video() {
    let app = create_test_app().await;
    app.mock_music_submit("m1").await;
    Mock::given(method("GET"))
        .and(path("/music/status/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": { "audio_url": "a.mp3", "image_url": "i.png" }
        })))
        .mount(&app.upstream)
        .await;
    app.mock_video_submit("v1").await;
    Mock::given(method("GET"))
        .and(path("/video/status/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "video_url": "v.mp4"
        })))
        .mount(&app.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/merge/merge"))
        .and(body_partial_json(json!({ "audio_url": "a.mp3", "video_url": "v.mp4" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "s3_url": "merged.mp4" })),
        )
        .expect(1)
        .mount(&app.upstream)
        .await;
    app.mock_chain_success("MINT999").await;

    // 1. music
    let music = app
        .server
        .post("/generate/music")
        .json(&json!({ "prompt": "sunset", "task_id": "t1", "walletAddress": "wallet1" }))
        .await;
    assert_eq!(music.status_code(), 200);
    let music: serde_json::Value = music.json();
    assert_eq!(music["data"]["music_task_id"], "m1");

    let audio: serde_json::Value = app
        .server
        .get("/callback/music")
        .add_query_param("task_id", "t1")
        .await
        .json();
    assert_eq!(audio["data"]["audio_url"], "a.mp3");
    assert_eq!(audio["data"]["image_url"], "i.png");

    // 2. video
    let video = app
        .server
        .post("/generate/video")
        .json(&json!({ "prompt": "sunset city", "task_id": "t1" }))
        .await;
    assert_eq!(video.status_code(), 200);
    let clip: serde_json::Value = app
        .server
        .get("/callback/video")
        .add_query_param("task_id", "t1")
        .await
        .json();
    assert_eq!(clip["data"]["video_url"], "v.mp4");

    // 3. merge, repeated call is served from the stored url
    for _ in 0..2 {
        let merged = app
            .server
            .post("/generate/merge")
            .json(&json!({ "task_id": "t1" }))
            .await;
        assert_eq!(merged.status_code(), 200);
        let merged: serde_json::Value = merged.json();
        assert_eq!(merged["data"]["s3_url"], "merged.mp4");
    }

    // 4. release
    let release = app
        .server
        .post("/release")
        .json(&json!({
            "tokenAddress": "MINT123",
            "title": "Sunset",
            "url": "merged.mp4",
            "walletAddress": "wallet1",
            "taskId": "t1"
        }))
        .await;
    assert_eq!(release.status_code(), 201);
    let release: serde_json::Value = release.json();
    let video_id = release["videoId"].as_str().unwrap().to_string();

    // 5. mint
    assert_eq!(app.mint_worker.drain().await, 1);

    let nft = app
        .server
        .get("/nft")
        .add_query_param("video_id", &video_id)
        .await;
    assert_eq!(nft.status_code(), 200);
    let nft: serde_json::Value = nft.json();
    assert_eq!(nft["success"], true);
    assert_eq!(nft["data"]["nft_address"], "MINT999");
    assert_eq!(nft["data"]["status"], "completed");
}
