// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::callback_request::{CallbackAck, CallbackRequestDto};
use crate::application::use_cases::errors::PipelineError;
use crate::domain::models::generation::{GenerationPatch, GenerationTask, VideoGenerationTask};
use crate::domain::repositories::generation_repository::{
    MusicTaskRepository, VideoTaskRepository,
};
use crate::domain::services::generation::{
    MusicGenerator, MusicResult, ProviderStatus, VideoGenerator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// 视频阶段的轮询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoOutput {
    pub video_url: String,
    pub merged_video_url: Option<String>,
}

/// 回调/轮询桥接
///
/// 推送回调与客户端轮询都只读写持久化状态；
/// 轮询到仍在等待的任务时会向上游查询一次（pull-through）。
pub struct CallbackUseCase {
    music_repo: Arc<dyn MusicTaskRepository>,
    video_repo: Arc<dyn VideoTaskRepository>,
    music_service: Arc<dyn MusicGenerator>,
    video_service: Arc<dyn VideoGenerator>,
}

impl CallbackUseCase {
    pub fn new(
        music_repo: Arc<dyn MusicTaskRepository>,
        video_repo: Arc<dyn VideoTaskRepository>,
        music_service: Arc<dyn MusicGenerator>,
        video_service: Arc<dyn VideoGenerator>,
    ) -> Self {
        Self {
            music_repo,
            video_repo,
            music_service,
            video_service,
        }
    }

    async fn find_music(&self, id: &str) -> Result<GenerationTask, PipelineError> {
        if let Some(task) = self.music_repo.find_by_task_id(id).await? {
            return Ok(task);
        }
        self.music_repo
            .find_by_music_task_id(id)
            .await?
            .ok_or_else(|| PipelineError::NotFound("music task".to_string()))
    }

    async fn find_video(&self, id: &str) -> Result<VideoGenerationTask, PipelineError> {
        if let Some(task) = self.video_repo.find_by_task_id(id).await? {
            return Ok(task);
        }
        self.video_repo
            .find_by_video_task_id(id)
            .await?
            .ok_or_else(|| PipelineError::NotFound("video task".to_string()))
    }

    /// 处理音乐服务的推送回调
    pub async fn push_music(&self, dto: CallbackRequestDto) -> Result<CallbackAck, PipelineError> {
        let task = self.find_music(dto.task_id.trim()).await?;

        let updated = if dto.is_failure() {
            let message = dto
                .error
                .clone()
                .unwrap_or_else(|| "music generation failed upstream".to_string());
            warn!(task_id = %task.task_id, error = %message, "Music callback reported failure");
            self.music_repo
                .patch_by_task_id(&task.task_id, &GenerationPatch::failed(message))
                .await?
        } else if let Some(audio_url) = dto.field("audio_url") {
            info!(task_id = %task.task_id, "Music callback received");
            self.music_repo
                .patch_by_task_id(
                    &task.task_id,
                    &GenerationPatch::music_ready(audio_url, dto.field("image_url")),
                )
                .await?
        } else {
            // 中间状态通知，不改动记录
            task
        };

        Ok(CallbackAck {
            success: true,
            task_id: updated.task_id,
            status: updated.status.to_string(),
        })
    }

    /// 轮询音乐结果
    pub async fn poll_music(&self, task_id: &str) -> Result<MusicResult, PipelineError> {
        let task = self.find_music(task_id.trim()).await?;

        if task.is_failed() {
            return Err(PipelineError::GenerationFailed(
                task.error_message.unwrap_or_else(|| "music generation failed".to_string()),
            ));
        }
        if let (true, Some(audio_url)) = (task.is_completed, task.audio_url.clone()) {
            return Ok(MusicResult {
                audio_url,
                image_url: task.image_url,
            });
        }

        let Some(provider_task_id) = task.music_task_id.as_deref() else {
            return Err(PipelineError::NotReady("music is not ready".to_string()));
        };

        match self.music_service.query(provider_task_id).await {
            Ok(ProviderStatus::Ready(result)) => {
                self.music_repo
                    .patch_by_task_id(
                        &task.task_id,
                        &GenerationPatch::music_ready(
                            result.audio_url.clone(),
                            result.image_url.clone(),
                        ),
                    )
                    .await?;
                info!(task_id = %task.task_id, "Music completed via provider query");
                Ok(result)
            }
            Ok(ProviderStatus::Failed(message)) => {
                self.music_repo
                    .patch_by_task_id(&task.task_id, &GenerationPatch::failed(message.clone()))
                    .await?;
                Err(PipelineError::GenerationFailed(message))
            }
            Ok(ProviderStatus::Pending) => {
                Err(PipelineError::NotReady("music is not ready".to_string()))
            }
            Err(e) => {
                warn!(task_id = %task.task_id, error = %e, "Provider status query failed");
                Err(PipelineError::NotReady("music is not ready".to_string()))
            }
        }
    }

    /// 处理视频服务的推送回调
    pub async fn push_video(&self, dto: CallbackRequestDto) -> Result<CallbackAck, PipelineError> {
        let task = self.find_video(dto.task_id.trim()).await?;

        let updated = if dto.is_failure() {
            let message = dto
                .error
                .clone()
                .unwrap_or_else(|| "video generation failed upstream".to_string());
            warn!(task_id = %task.task_id, error = %message, "Video callback reported failure");
            self.video_repo
                .patch_by_task_id(&task.task_id, &GenerationPatch::failed(message))
                .await?
        } else if let Some(video_url) = dto.field("video_url") {
            info!(task_id = %task.task_id, "Video callback received");
            self.video_repo
                .patch_by_task_id(&task.task_id, &GenerationPatch::video_ready(video_url))
                .await?
        } else {
            task
        };

        Ok(CallbackAck {
            success: true,
            task_id: updated.task_id,
            status: updated.status.to_string(),
        })
    }

    /// 轮询视频结果
    pub async fn poll_video(&self, task_id: &str) -> Result<VideoOutput, PipelineError> {
        let task = self.find_video(task_id.trim()).await?;

        if task.is_failed() {
            return Err(PipelineError::GenerationFailed(
                task.error_message.unwrap_or_else(|| "video generation failed".to_string()),
            ));
        }
        if let Some(video_url) = task.video_url.clone() {
            return Ok(VideoOutput {
                video_url,
                merged_video_url: task.merged_video_url,
            });
        }

        let Some(provider_task_id) = task.video_task_id.as_deref() else {
            return Err(PipelineError::NotReady("video is not ready".to_string()));
        };

        match self.video_service.query(provider_task_id).await {
            Ok(ProviderStatus::Ready(result)) => {
                self.video_repo
                    .patch_by_task_id(
                        &task.task_id,
                        &GenerationPatch::video_ready(result.video_url.clone()),
                    )
                    .await?;
                info!(task_id = %task.task_id, "Video completed via provider query");
                Ok(VideoOutput {
                    video_url: result.video_url,
                    merged_video_url: None,
                })
            }
            Ok(ProviderStatus::Failed(message)) => {
                self.video_repo
                    .patch_by_task_id(&task.task_id, &GenerationPatch::failed(message.clone()))
                    .await?;
                Err(PipelineError::GenerationFailed(message))
            }
            Ok(ProviderStatus::Pending) => {
                Err(PipelineError::NotReady("video is not ready".to_string()))
            }
            Err(e) => {
                warn!(task_id = %task.task_id, error = %e, "Provider status query failed");
                Err(PipelineError::NotReady("video is not ready".to_string()))
            }
        }
    }
}
