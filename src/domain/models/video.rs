// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 视频状态
///
/// 发布时创建为 Processing，由铸造工作器翻转为 Completed 或 Failed。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    #[default]
    Processing,
    Ready,
    Completed,
    Failed,
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VideoStatus::Processing => write!(f, "processing"),
            VideoStatus::Ready => write!(f, "ready"),
            VideoStatus::Completed => write!(f, "completed"),
            VideoStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for VideoStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(VideoStatus::Processing),
            "ready" => Ok(VideoStatus::Ready),
            "completed" => Ok(VideoStatus::Completed),
            "failed" => Ok(VideoStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 已发布的视频
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub token_id: Uuid,
    /// 生成该视频的流水线任务ID，用于发布幂等
    pub task_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub thumbnail_url: Option<String>,
    /// 时长（秒）
    pub duration: Option<i32>,
    pub status: VideoStatus,
    pub nft_address: Option<String>,
    pub creator: Option<String>,
    pub play_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Video {
    pub fn new(token_id: Uuid, title: String, url: String) -> Self {
        let now = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            token_id,
            task_id: None,
            title,
            description: None,
            url,
            thumbnail_url: None,
            duration: None,
            status: VideoStatus::Processing,
            nft_address: None,
            creator: None,
            play_count: 0,
            like_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 点赞记录，(user_id, video_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLike {
    pub id: Uuid,
    pub user_id: String,
    pub video_id: Uuid,
    pub created_at: DateTime<FixedOffset>,
}

/// 评论，`parent_id` 仅允许一层回复
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_address: String,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}

impl Comment {
    pub fn new(
        video_id: Uuid,
        user_address: String,
        content: String,
        parent_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            video_id,
            user_address,
            content,
            parent_id,
            created_at: Utc::now().into(),
        }
    }
}

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStats {
    pub creator: String,
    pub video_count: i64,
    pub total_likes: i64,
    pub total_plays: i64,
}
