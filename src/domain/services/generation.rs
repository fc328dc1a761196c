// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 生成服务错误
///
/// 客户端不自动重试，重试由调用方负责。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// 上游返回非 2xx、负载格式错误或网络失败
    #[error("{service} request failed (status: {status:?}): {body}")]
    RequestFailed {
        service: String,
        status: Option<u16>,
        body: String,
    },
}

impl GenerationError {
    pub fn request_failed(
        service: impl Into<String>,
        status: Option<u16>,
        body: impl Into<String>,
    ) -> Self {
        GenerationError::RequestFailed {
            service: service.into(),
            status,
            body: body.into(),
        }
    }
}

/// 提交结果：上游分配的任务ID，或可直接使用的同步结果
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<T> {
    pub provider_task_id: Option<String>,
    pub result: Option<T>,
}

/// 上游任务状态
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderStatus<T> {
    Pending,
    Ready(T),
    Failed(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicRequest {
    pub prompt: String,
    pub genre: Option<String>,
    pub instrumental: bool,
    pub model_version: Option<String>,
    /// 上游超时提示（秒）
    pub timeout: Option<u64>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicResult {
    pub audio_url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRequest {
    pub prompt: String,
    pub style: Option<String>,
    pub timeout: Option<u64>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    pub audio_url: String,
    pub video_url: String,
}

/// 音乐生成服务
#[async_trait]
pub trait MusicGenerator: Send + Sync {
    async fn submit(
        &self,
        request: &MusicRequest,
    ) -> Result<Submission<MusicResult>, GenerationError>;
    async fn query(
        &self,
        provider_task_id: &str,
    ) -> Result<ProviderStatus<MusicResult>, GenerationError>;
}

/// 视频生成服务
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn submit(
        &self,
        request: &VideoRequest,
    ) -> Result<Submission<VideoResult>, GenerationError>;
    async fn query(
        &self,
        provider_task_id: &str,
    ) -> Result<ProviderStatus<VideoResult>, GenerationError>;
}

/// 音视频合并服务，同步返回合并后的地址
#[async_trait]
pub trait MergeService: Send + Sync {
    async fn merge(&self, request: &MergeRequest) -> Result<String, GenerationError>;
}
