// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use crate::domain::services::generation::GenerationError;
use thiserror::Error;
use validator::ValidationErrors;

/// 流水线用例错误
#[derive(Error, Debug)]
pub enum PipelineError {
    /// 输入缺失或格式错误，不会自动重试
    #[error("Validation failed: {0}")]
    ValidationError(String),
    /// 上游生成服务返回失败，调用方可用同一 task_id 重新提交
    #[error(transparent)]
    GenerationRequestFailed(#[from] GenerationError),
    /// 合并所需的音频或视频尚未就绪
    #[error("Missing dependency: {0}")]
    MissingDependency(String),
    #[error("{0} not found")]
    NotFound(String),
    /// 结果尚未就绪，客户端继续轮询
    #[error("{0}")]
    NotReady(String),
    /// 生成阶段已进入失败终态
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("Video already liked")]
    AlreadyLiked,
    #[error("Video not liked")]
    NotLiked,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<ValidationErrors> for PipelineError {
    fn from(errors: ValidationErrors) -> Self {
        PipelineError::ValidationError(errors.to_string())
    }
}
