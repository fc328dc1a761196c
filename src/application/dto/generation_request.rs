// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use crate::utils::validation::non_blank;
use validator::Validate;

/// 音乐生成请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct MusicGenerationRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "prompt is required"))]
    pub prompt: String,
    pub genre: Option<String>,
    #[serde(default)]
    pub instrumental: bool,
    pub model_version: Option<String>,
    /// 上游超时提示（秒）
    pub timeout: Option<u64>,
    /// 调用方生成的关联ID，缺省时由服务端分配
    pub task_id: Option<String>,
    #[serde(rename = "walletAddress", alias = "wallet_address")]
    pub wallet_address: Option<String>,
}

/// 视频生成请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct VideoGenerationRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "prompt is required"))]
    pub prompt: String,
    pub timeout: Option<u64>,
    pub task_id: Option<String>,
    #[serde(rename = "walletAddress", alias = "wallet_address")]
    pub wallet_address: Option<String>,
    #[serde(alias = "style")]
    pub video_style: Option<String>,
}

/// 合并请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct MergeRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "task_id is required"))]
    pub task_id: String,
}

/// 生成阶段的统一响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse<T> {
    pub success: bool,
    pub task_id: String,
    pub data: T,
}

impl<T> GenerationResponse<T> {
    pub fn new(task_id: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            task_id: task_id.into(),
            data,
        }
    }
}

/// 合并结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    pub s3_url: String,
}
