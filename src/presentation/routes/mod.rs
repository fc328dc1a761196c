// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{
    callback_handler, generation_handler, release_handler, social_handler,
};
use crate::presentation::middleware::callback_signature::{
    callback_signature_middleware, CallbackAuth,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// 用例通过 `Extension<Arc<…>>` 注入，由调用方添加对应的 layer。
/// 推送回调路由额外挂载签名校验。
pub fn routes(callback_auth: CallbackAuth) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let pipeline_routes = Router::new()
        .route("/generate/music", post(generation_handler::generate_music))
        .route("/generate/video", post(generation_handler::generate_video))
        .route("/generate/merge", post(generation_handler::merge))
        .route("/release", post(release_handler::release))
        .route("/nft", get(release_handler::get_nft));

    let callback_routes = Router::new()
        .route(
            "/callback/music",
            get(callback_handler::poll_music).post(callback_handler::music_callback),
        )
        .route(
            "/callback/video",
            get(callback_handler::poll_video).post(callback_handler::video_callback),
        )
        .route_layer(middleware::from_fn_with_state(
            callback_auth,
            callback_signature_middleware,
        ));

    let social_routes = Router::new()
        .route(
            "/videos/{id}/like",
            post(social_handler::like_video).delete(social_handler::unlike_video),
        )
        .route(
            "/videos/{id}/comments",
            get(social_handler::list_comments).post(social_handler::add_comment),
        )
        .route("/videos/{id}/play", post(social_handler::record_play))
        .route("/leaderboard", get(social_handler::leaderboard));

    Router::new()
        .merge(public_routes)
        .merge(pipeline_routes)
        .merge(callback_routes)
        .merge(social_routes)
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
