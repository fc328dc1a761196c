// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::release_request::{NftQuery, ReleaseRequestDto, ReleaseResponse};
use crate::application::use_cases::release_use_case::ReleaseUseCase;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

/// 发布视频，铸造在后台进行
pub async fn release(
    Extension(use_case): Extension<Arc<ReleaseUseCase>>,
    Json(payload): Json<ReleaseRequestDto>,
) -> Result<(StatusCode, Json<ReleaseResponse>), AppError> {
    let response = use_case.release(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_nft(
    Extension(use_case): Extension<Arc<ReleaseUseCase>>,
    Query(query): Query<NftQuery>,
) -> Result<impl IntoResponse, AppError> {
    let nft = use_case.nft_status(query.video_id).await?;
    Ok(Json(json!({ "success": true, "data": nft })))
}
