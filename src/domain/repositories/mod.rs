// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 生成任务仓库（generation_repository）：raw_music / raw_video 流水线状态
/// - 代币仓库（token_repository）：按 mint 地址 upsert 代币
/// - 视频仓库（video_repository）：已发布视频、铸造结果与排行榜
/// - 社交仓库（social_repository）：点赞与评论
/// - 铸造作业仓库（mint_job_repository）：持久化的铸造发件箱
/// - 存储仓库（storage_repository）：对象存储
/// - 告警事件仓库（webhook_event_repository）：告警投递
pub mod generation_repository;
pub mod mint_job_repository;
pub mod social_repository;
pub mod storage_repository;
pub mod token_repository;
pub mod video_repository;
pub mod webhook_event_repository;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 负载序列化失败
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    /// 是否为唯一约束冲突
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::Database(err)
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }
}

/// `create_if_absent` 的结果
///
/// 记录已存在不是错误，调用方拿到的是已有记录。
#[derive(Debug, Clone)]
pub enum CreateOutcome<T> {
    Created(T),
    Existing(T),
}

impl<T> CreateOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            CreateOutcome::Created(value) | CreateOutcome::Existing(value) => value,
        }
    }
}
