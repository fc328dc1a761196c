// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::validation::non_blank;
use validator::Validate;

/// 发布请求
///
/// 必填字段缺失时反序列化为空串，由校验统一报 400
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "tokenAddress is required"))]
    pub token_address: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "url is required"))]
    pub url: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    /// 创作者钱包，同时是 NFT 接收方
    #[serde(alias = "creator")]
    pub wallet_address: Option<String>,
    #[serde(alias = "task_id")]
    pub task_id: Option<String>,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub market_cap: Option<f64>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
}

/// 发布结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseResponse {
    pub success: bool,
    pub token_id: Uuid,
    pub video_id: Uuid,
}

/// NFT 查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct NftQuery {
    pub video_id: Uuid,
}

/// 已铸造的 NFT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftStatus {
    pub nft_address: String,
    pub status: String,
}
