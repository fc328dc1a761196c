// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::social_request::{
    CommentRequestDto, CommentThread, LeaderboardQuery, LikeRequestDto, LikeResponse,
    PlayResponse,
};
use crate::application::use_cases::social_use_case::SocialUseCase;
use crate::domain::models::video::{Comment, CreatorStats};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn like_video(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Path(video_id): Path<Uuid>,
    Json(payload): Json<LikeRequestDto>,
) -> Result<Json<LikeResponse>, AppError> {
    Ok(Json(use_case.like(video_id, payload).await?))
}

pub async fn unlike_video(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Path(video_id): Path<Uuid>,
    Json(payload): Json<LikeRequestDto>,
) -> Result<Json<LikeResponse>, AppError> {
    Ok(Json(use_case.unlike(video_id, payload).await?))
}

pub async fn add_comment(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Path(video_id): Path<Uuid>,
    Json(payload): Json<CommentRequestDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = use_case.add_comment(video_id, payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Vec<CommentThread>>, AppError> {
    Ok(Json(use_case.list_comments(video_id).await?))
}

pub async fn record_play(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Path(video_id): Path<Uuid>,
) -> Result<Json<PlayResponse>, AppError> {
    Ok(Json(use_case.record_play(video_id).await?))
}

pub async fn leaderboard(
    Extension(use_case): Extension<Arc<SocialUseCase>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<CreatorStats>>, AppError> {
    Ok(Json(use_case.leaderboard(query.limit).await?))
}
