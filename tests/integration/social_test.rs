// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{create_test_app, TestApp};
use serde_json::json;

async fn release(app: &TestApp, token: &str, creator: &str) -> String {
    let body: serde_json::Value = app
        .server
        .post("/release")
        .json(&json!({
            "tokenAddress": token,
            "title": format!("{} video", creator),
            "url": "https://cdn.test/v.mp4",
            "creator": creator
        }))
        .await
        .json();
    body["videoId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_like_and_unlike_conflicts() {
    let app = create_test_app().await;
    let video_id = release(&app, "MINT1", "alice").await;
    let like_path = format!("/videos/{}/like", video_id);
    let user = json!({ "userId": "u1" });

    let liked = app.server.post(&like_path).json(&user).await;
    assert_eq!(liked.status_code(), 200);
    let body: serde_json::Value = liked.json();
    assert_eq!(body["liked"], true);
    assert_eq!(body["likeCount"], 1);

    let again = app.server.post(&like_path).json(&user).await;
    assert_eq!(again.status_code(), 409);

    let unliked = app.server.delete(&like_path).json(&user).await;
    assert_eq!(unliked.status_code(), 200);
    let body: serde_json::Value = unliked.json();
    assert_eq!(body["likeCount"], 0);

    let not_liked = app.server.delete(&like_path).json(&user).await;
    assert_eq!(not_liked.status_code(), 409);
}

#[tokio::test]
async fn test_comment_thread_round_trip() {
    let app = create_test_app().await;
    let video_id = release(&app, "MINT1", "alice").await;
    let comments_path = format!("/videos/{}/comments", video_id);

    let root = app
        .server
        .post(&comments_path)
        .json(&json!({ "userAddress": "wallet2", "content": "great track" }))
        .await;
    assert_eq!(root.status_code(), 201);
    let root: serde_json::Value = root.json();

    let reply = app
        .server
        .post(&comments_path)
        .json(&json!({
            "userAddress": "wallet1",
            "content": "thanks",
            "parentId": root["id"]
        }))
        .await;
    assert_eq!(reply.status_code(), 201);

    let threads: serde_json::Value = app.server.get(&comments_path).await.json();
    let threads = threads.as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["content"], "great track");
    assert_eq!(threads[0]["replies"][0]["content"], "thanks");
}

#[tokio::test]
async fn test_like_unknown_video_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post(&format!("/videos/{}/like", uuid::Uuid::new_v4()))
        .json(&json!({ "userId": "u1" }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_leaderboard_ranks_creators() {
    let app = create_test_app().await;
    let alice = release(&app, "MINT1", "alice").await;
    let bob = release(&app, "MINT2", "bob").await;

    for user in ["u1", "u2"] {
        app.server
            .post(&format!("/videos/{}/like", alice))
            .json(&json!({ "userId": user }))
            .await;
    }
    let play = app.server.post(&format!("/videos/{}/play", bob)).await;
    assert_eq!(play.status_code(), 200);
    let play: serde_json::Value = play.json();
    assert_eq!(play["playCount"], 1);

    let board: serde_json::Value = app
        .server
        .get("/leaderboard")
        .add_query_param("limit", 10)
        .await
        .json();
    let board = board.as_array().unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0]["creator"], "alice");
    assert_eq!(board[0]["totalLikes"], 2);
    assert_eq!(board[1]["creator"], "bob");
    assert_eq!(board[1]["totalPlays"], 1);
}
