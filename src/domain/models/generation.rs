// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 生成阶段状态
///
/// 状态转换：
/// Pending → (VideoReady) → Completed
/// Pending / VideoReady → Failed（上游失败回调或超时）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// 已提交，等待上游完成
    #[default]
    Pending,
    /// 视频已生成，等待与音频合并（仅视频阶段使用）
    VideoReady,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationStatus::Pending => write!(f, "pending"),
            GenerationStatus::VideoReady => write!(f, "video_ready"),
            GenerationStatus::Completed => write!(f, "completed"),
            GenerationStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for GenerationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GenerationStatus::Pending),
            "video_ready" => Ok(GenerationStatus::VideoReady),
            "completed" => Ok(GenerationStatus::Completed),
            "failed" => Ok(GenerationStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 音乐生成任务（raw_music）
///
/// 以调用方提供的 `task_id` 作为幂等键，同一 `task_id` 至多一行。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationTask {
    /// 自增主键，用于"最新写入优先"排序
    pub id: i32,
    /// 调用方生成的关联ID
    pub task_id: String,
    /// 音乐服务分配的任务ID
    pub music_task_id: Option<String>,
    /// 用户钱包地址
    pub user_address: Option<String>,
    pub prompt: String,
    pub genre: Option<String>,
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub status: GenerationStatus,
    pub is_completed: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl GenerationTask {
    /// 创建一个待完成的音乐任务
    pub fn new(
        task_id: String,
        prompt: String,
        genre: Option<String>,
        user_address: Option<String>,
        music_task_id: Option<String>,
    ) -> Self {
        let now = Utc::now().into();
        Self {
            id: 0,
            task_id,
            music_task_id,
            user_address,
            prompt,
            genre,
            audio_url: None,
            image_url: None,
            status: GenerationStatus::Pending,
            is_completed: false,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == GenerationStatus::Failed
    }
}

/// 视频生成任务（raw_video）
///
/// 与 [`GenerationTask`] 通过相同的 `task_id` 逻辑关联，没有外键，
/// 允许两个阶段的结果乱序到达。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoGenerationTask {
    pub id: i32,
    pub task_id: String,
    /// 视频服务分配的请求ID
    pub video_task_id: Option<String>,
    pub user_address: Option<String>,
    pub prompt: String,
    pub style: Option<String>,
    pub video_url: Option<String>,
    /// 合并后的视频地址，非空即表示合并已完成
    pub merged_video_url: Option<String>,
    pub status: GenerationStatus,
    pub is_completed: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl VideoGenerationTask {
    pub fn new(
        task_id: String,
        prompt: String,
        style: Option<String>,
        user_address: Option<String>,
        video_task_id: Option<String>,
    ) -> Self {
        let now = Utc::now().into();
        Self {
            id: 0,
            task_id,
            video_task_id,
            user_address,
            prompt,
            style,
            video_url: None,
            merged_video_url: None,
            status: GenerationStatus::Pending,
            is_completed: false,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == GenerationStatus::Failed
    }
}

/// 生成任务的部分更新
///
/// `None` 字段保持原值不变；状态改为非 failed 时清除旧的错误信息。
#[derive(Debug, Clone, Default)]
pub struct GenerationPatch {
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub merged_video_url: Option<String>,
    pub status: Option<GenerationStatus>,
    pub is_completed: Option<bool>,
    pub error_message: Option<String>,
}

impl GenerationPatch {
    /// 音乐完成
    pub fn music_ready(audio_url: String, image_url: Option<String>) -> Self {
        Self {
            audio_url: Some(audio_url),
            image_url,
            status: Some(GenerationStatus::Completed),
            is_completed: Some(true),
            ..Default::default()
        }
    }

    /// 视频已生成但尚未合并，`is_completed` 只在合并后翻转
    pub fn video_ready(video_url: String) -> Self {
        Self {
            video_url: Some(video_url),
            status: Some(GenerationStatus::VideoReady),
            ..Default::default()
        }
    }

    pub fn merged(merged_video_url: String) -> Self {
        Self {
            merged_video_url: Some(merged_video_url),
            status: Some(GenerationStatus::Completed),
            is_completed: Some(true),
            ..Default::default()
        }
    }

    /// 是否应清除已记录的错误信息
    pub fn clears_error(&self) -> bool {
        self.error_message.is_none()
            && self
                .status
                .is_some_and(|status| status != GenerationStatus::Failed)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(GenerationStatus::Failed),
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// 生成阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Music,
    Video,
    Merge,
    Release,
    Mint,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Music => write!(f, "music"),
            Stage::Video => write!(f, "video"),
            Stage::Merge => write!(f, "merge"),
            Stage::Release => write!(f, "release"),
            Stage::Mint => write!(f, "mint"),
        }
    }
}
