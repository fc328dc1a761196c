// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::generation_request::{
    GenerationResponse, MergeRequestDto, MergeResult, MusicGenerationRequestDto,
    VideoGenerationRequestDto,
};
use crate::application::use_cases::generation_use_case::GenerationUseCase;
use crate::domain::models::generation::{GenerationTask, VideoGenerationTask};
use crate::presentation::errors::AppError;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn generate_music(
    Extension(use_case): Extension<Arc<GenerationUseCase>>,
    Json(payload): Json<MusicGenerationRequestDto>,
) -> Result<Json<GenerationResponse<GenerationTask>>, AppError> {
    let task = use_case.submit_music(payload).await?;
    Ok(Json(GenerationResponse::new(task.task_id.clone(), task)))
}

pub async fn generate_video(
    Extension(use_case): Extension<Arc<GenerationUseCase>>,
    Json(payload): Json<VideoGenerationRequestDto>,
) -> Result<Json<GenerationResponse<VideoGenerationTask>>, AppError> {
    let task = use_case.submit_video(payload).await?;
    Ok(Json(GenerationResponse::new(task.task_id.clone(), task)))
}

pub async fn merge(
    Extension(use_case): Extension<Arc<GenerationUseCase>>,
    Json(payload): Json<MergeRequestDto>,
) -> Result<Json<GenerationResponse<MergeResult>>, AppError> {
    let task_id = payload.task_id.trim().to_string();
    let result = use_case.merge(payload).await?;
    Ok(Json(GenerationResponse::new(task_id, result)))
}
