// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::callback_request::{CallbackAck, CallbackRequestDto, TaskQuery};
use crate::application::use_cases::callback_use_case::CallbackUseCase;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Json, Query},
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

/// 音乐服务推送回调
pub async fn music_callback(
    Extension(use_case): Extension<Arc<CallbackUseCase>>,
    Json(payload): Json<CallbackRequestDto>,
) -> Result<Json<CallbackAck>, AppError> {
    Ok(Json(use_case.push_music(payload).await?))
}

/// 客户端轮询音乐结果，未完成时返回 404
pub async fn poll_music(
    Extension(use_case): Extension<Arc<CallbackUseCase>>,
    Query(query): Query<TaskQuery>,
) -> Result<impl IntoResponse, AppError> {
    let result = use_case.poll_music(&query.task_id).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}

/// 视频服务推送回调
pub async fn video_callback(
    Extension(use_case): Extension<Arc<CallbackUseCase>>,
    Json(payload): Json<CallbackRequestDto>,
) -> Result<Json<CallbackAck>, AppError> {
    Ok(Json(use_case.push_video(payload).await?))
}

pub async fn poll_video(
    Extension(use_case): Extension<Arc<CallbackUseCase>>,
    Query(query): Query<TaskQuery>,
) -> Result<impl IntoResponse, AppError> {
    let result = use_case.poll_video(&query.task_id).await?;
    Ok(Json(json!({ "success": true, "data": result })))
}
