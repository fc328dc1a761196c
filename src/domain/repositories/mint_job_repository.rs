// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{CreateOutcome, RepositoryError};
use crate::domain::models::mint_job::{MintJob, MintProgress};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 铸造作业仓库特质
#[async_trait]
pub trait MintJobRepository: Send + Sync {
    /// 入队；同一视频已有作业时返回已有作业
    async fn enqueue(&self, job: &MintJob) -> Result<CreateOutcome<MintJob>, RepositoryError>;
    /// 以条件更新认领最早的待处理作业（pending → running）
    async fn claim_next(&self) -> Result<Option<MintJob>, RepositoryError>;
    /// 记录一次失败尝试
    async fn record_attempt(
        &self,
        id: Uuid,
        attempt_count: i32,
        error: &str,
    ) -> Result<(), RepositoryError>;
    /// 写回已完成的链上步骤
    async fn save_progress(&self, id: Uuid, progress: &MintProgress) -> Result<(), RepositoryError>;
    async fn mark_completed(&self, id: Uuid, attempt_count: i32) -> Result<(), RepositoryError>;
    async fn mark_failed(
        &self,
        id: Uuid,
        attempt_count: i32,
        error: &str,
    ) -> Result<(), RepositoryError>;
    /// 将认领时间早于 `cutoff` 的 running 作业重置为 pending
    async fn reset_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
    async fn find_by_video_id(&self, video_id: Uuid) -> Result<Option<MintJob>, RepositoryError>;
}
