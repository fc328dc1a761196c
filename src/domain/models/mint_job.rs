// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 铸造作业状态
///
/// Pending → Running → Completed/Failed
/// Running 超过锁超时会被重置回 Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MintJobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for MintJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MintJobStatus::Pending => write!(f, "pending"),
            MintJobStatus::Running => write!(f, "running"),
            MintJobStatus::Completed => write!(f, "completed"),
            MintJobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for MintJobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MintJobStatus::Pending),
            "running" => Ok(MintJobStatus::Running),
            "completed" => Ok(MintJobStatus::Completed),
            "failed" => Ok(MintJobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// NFT 铸造请求
///
/// 作为作业负载持久化，进程重启后可恢复。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintRequest {
    pub video_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// 缩略图地址，作为 NFT 的 image
    pub image_url: Option<String>,
    /// 视频地址，作为 NFT 的 animation_url
    pub animation_url: String,
    pub token_mint: String,
    pub token_symbol: String,
    /// 接收 NFT 的钱包
    pub destination_wallet: String,
    pub attributes: Vec<NftAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

impl MintRequest {
    /// 构建 NFT 元数据 JSON（Metaplex 兼容结构）
    pub fn metadata_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.title,
            "symbol": self.token_symbol,
            "description": self.description.clone().unwrap_or_default(),
            "image": self.image_url.clone().unwrap_or_default(),
            "animation_url": self.animation_url,
            "attributes": self.attributes,
            "properties": {
                "category": "video",
                "files": [
                    { "uri": self.animation_url, "type": "video/mp4" }
                ]
            }
        })
    }
}

/// 已完成的链上步骤
///
/// 每步成功后写回作业行；作业被回收重跑时从这里继续，不会重复铸造。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MintProgress {
    pub metadata_uri: Option<String>,
    pub mint_address: Option<String>,
    pub token_account: Option<String>,
    pub transfer_signature: Option<String>,
}

/// 持久化的铸造作业（发件箱行）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintJob {
    pub id: Uuid,
    pub video_id: Uuid,
    pub request: MintRequest,
    pub status: MintJobStatus,
    pub attempt_count: i32,
    pub last_error: Option<String>,
    pub locked_at: Option<DateTime<FixedOffset>>,
    pub progress: MintProgress,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl MintJob {
    pub fn new(request: MintRequest) -> Self {
        let now = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            video_id: request.video_id,
            request,
            status: MintJobStatus::Pending,
            attempt_count: 0,
            last_error: None,
            locked_at: None,
            progress: MintProgress::default(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
