// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{CreateOutcome, RepositoryError};
use crate::domain::models::generation::{GenerationPatch, GenerationTask, VideoGenerationTask};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 音乐任务仓库（raw_music）
#[async_trait]
pub trait MusicTaskRepository: Send + Sync {
    /// 插入新任务；`task_id` 已存在时返回已有记录
    async fn create_if_absent(
        &self,
        task: &GenerationTask,
    ) -> Result<CreateOutcome<GenerationTask>, RepositoryError>;
    async fn find_by_task_id(&self, task_id: &str)
        -> Result<Option<GenerationTask>, RepositoryError>;
    /// 根据音乐服务分配的ID查找
    async fn find_by_music_task_id(
        &self,
        music_task_id: &str,
    ) -> Result<Option<GenerationTask>, RepositoryError>;
    /// 查找该 `task_id` 下最近一条已有音频的记录
    async fn find_latest_with_audio(
        &self,
        task_id: &str,
    ) -> Result<Option<GenerationTask>, RepositoryError>;
    async fn patch_by_task_id(
        &self,
        task_id: &str,
        patch: &GenerationPatch,
    ) -> Result<GenerationTask, RepositoryError>;
    /// 将早于 `cutoff` 仍未完成的任务标记为失败
    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
}

/// 视频任务仓库（raw_video）
#[async_trait]
pub trait VideoTaskRepository: Send + Sync {
    async fn create_if_absent(
        &self,
        task: &VideoGenerationTask,
    ) -> Result<CreateOutcome<VideoGenerationTask>, RepositoryError>;
    async fn find_by_task_id(
        &self,
        task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError>;
    async fn find_by_video_task_id(
        &self,
        video_task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError>;
    /// 查找该 `task_id` 下最近一条已有视频的记录
    async fn find_latest_with_video(
        &self,
        task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError>;
    async fn patch_by_task_id(
        &self,
        task_id: &str,
        patch: &GenerationPatch,
    ) -> Result<VideoGenerationTask, RepositoryError>;
    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
