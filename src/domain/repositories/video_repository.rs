// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{CreateOutcome, RepositoryError};
use crate::domain::models::mint_job::MintJob;
use crate::domain::models::video::{CreatorStats, Video};
use async_trait::async_trait;
use uuid::Uuid;

/// 视频仓库特质
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// 在同一事务内插入视频与铸造作业，任一失败则都不写入
    ///
    /// 同一 `task_id` 已发布过时返回已有视频。
    async fn create_with_mint_job(
        &self,
        video: &Video,
        job: Option<&MintJob>,
    ) -> Result<CreateOutcome<Video>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, RepositoryError>;
    async fn find_by_task_id(&self, task_id: &str) -> Result<Option<Video>, RepositoryError>;
    /// 铸造成功：写入 NFT 地址并置为 completed
    async fn mark_minted(&self, id: Uuid, nft_address: &str) -> Result<(), RepositoryError>;
    /// 铸造终止失败
    async fn mark_failed(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 播放次数加一，返回新值
    async fn increment_play_count(&self, id: Uuid) -> Result<i64, RepositoryError>;
    /// 按创作者聚合点赞与播放
    async fn leaderboard(&self, limit: u64) -> Result<Vec<CreatorStats>, RepositoryError>;
}
