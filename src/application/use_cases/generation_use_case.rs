// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::generation_request::{
    MergeRequestDto, MergeResult, MusicGenerationRequestDto, VideoGenerationRequestDto,
};
use crate::application::use_cases::errors::PipelineError;
use crate::domain::models::generation::{
    GenerationPatch, GenerationStatus, GenerationTask, Stage, VideoGenerationTask,
};
use crate::domain::repositories::generation_repository::{
    MusicTaskRepository, VideoTaskRepository,
};
use crate::domain::repositories::CreateOutcome;
use crate::domain::services::generation::{
    GenerationError, MergeRequest, MergeService, MusicGenerator, MusicRequest, VideoGenerator,
    VideoRequest,
};
use crate::domain::services::task_id::resolve_task_id;
use metrics::counter;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

/// 生成阶段用例
///
/// 音乐、视频、合并三个阶段都以 `task_id` 为幂等键：
/// 已有记录直接返回，不会再次提交到上游服务。
pub struct GenerationUseCase {
    music_repo: Arc<dyn MusicTaskRepository>,
    video_repo: Arc<dyn VideoTaskRepository>,
    music_service: Arc<dyn MusicGenerator>,
    video_service: Arc<dyn VideoGenerator>,
    merge_service: Arc<dyn MergeService>,
    callback_base_url: Option<String>,
}

impl GenerationUseCase {
    pub fn new(
        music_repo: Arc<dyn MusicTaskRepository>,
        video_repo: Arc<dyn VideoTaskRepository>,
        music_service: Arc<dyn MusicGenerator>,
        video_service: Arc<dyn VideoGenerator>,
        merge_service: Arc<dyn MergeService>,
        callback_base_url: Option<String>,
    ) -> Self {
        Self {
            music_repo,
            video_repo,
            music_service,
            video_service,
            merge_service,
            callback_base_url,
        }
    }

    fn callback_url(&self, stage: Stage) -> Option<String> {
        self.callback_base_url
            .as_ref()
            .map(|base| format!("{}/callback/{}", base.trim_end_matches('/'), stage))
    }

    fn record_failure(stage: Stage, task_id: &str, err: &GenerationError) {
        counter!("generation_failures_total", "stage" => stage.to_string()).increment(1);
        error!(task_id = %task_id, stage = %stage, error = %err, "Upstream generation request failed");
    }

    /// 提交音乐生成
    pub async fn submit_music(
        &self,
        dto: MusicGenerationRequestDto,
    ) -> Result<GenerationTask, PipelineError> {
        dto.validate()?;
        let task_id = resolve_task_id(dto.task_id.as_deref());

        if let Some(existing) = self.music_repo.find_by_task_id(&task_id).await? {
            info!(task_id = %task_id, "Music task already submitted, returning existing record");
            return Ok(existing);
        }

        let request = MusicRequest {
            prompt: dto.prompt.clone(),
            genre: dto.genre.clone(),
            instrumental: dto.instrumental,
            model_version: dto.model_version.clone(),
            timeout: dto.timeout,
            callback_url: self.callback_url(Stage::Music),
        };

        let submission = self.music_service.submit(&request).await.map_err(|e| {
            Self::record_failure(Stage::Music, &task_id, &e);
            e
        })?;
        counter!("generation_submissions_total", "stage" => Stage::Music.to_string()).increment(1);

        let mut task = GenerationTask::new(
            task_id.clone(),
            dto.prompt,
            dto.genre,
            dto.wallet_address,
            submission.provider_task_id,
        );
        // 同步返回结果的上游直接完成
        if let Some(result) = submission.result {
            task.audio_url = Some(result.audio_url);
            task.image_url = result.image_url;
            task.status = GenerationStatus::Completed;
            task.is_completed = true;
        }

        match self.music_repo.create_if_absent(&task).await? {
            CreateOutcome::Created(created) => {
                info!(task_id = %task_id, music_task_id = ?created.music_task_id, "Music task created");
                Ok(created)
            }
            CreateOutcome::Existing(existing) => {
                warn!(task_id = %task_id, "Concurrent music submission detected, keeping first record");
                Ok(existing)
            }
        }
    }

    /// 提交视频生成
    pub async fn submit_video(
        &self,
        dto: VideoGenerationRequestDto,
    ) -> Result<VideoGenerationTask, PipelineError> {
        dto.validate()?;
        let task_id = resolve_task_id(dto.task_id.as_deref());

        if let Some(existing) = self.video_repo.find_by_task_id(&task_id).await? {
            info!(task_id = %task_id, "Video task already submitted, returning existing record");
            return Ok(existing);
        }

        let request = VideoRequest {
            prompt: dto.prompt.clone(),
            style: dto.video_style.clone(),
            timeout: dto.timeout,
            callback_url: self.callback_url(Stage::Video),
        };

        let submission = self.video_service.submit(&request).await.map_err(|e| {
            Self::record_failure(Stage::Video, &task_id, &e);
            e
        })?;
        counter!("generation_submissions_total", "stage" => Stage::Video.to_string()).increment(1);

        let mut task = VideoGenerationTask::new(
            task_id.clone(),
            dto.prompt,
            dto.video_style,
            dto.wallet_address,
            submission.provider_task_id,
        );
        if let Some(result) = submission.result {
            task.video_url = Some(result.video_url);
            task.status = GenerationStatus::VideoReady;
        }

        match self.video_repo.create_if_absent(&task).await? {
            CreateOutcome::Created(created) => {
                info!(task_id = %task_id, video_task_id = ?created.video_task_id, "Video task created");
                Ok(created)
            }
            CreateOutcome::Existing(existing) => {
                warn!(task_id = %task_id, "Concurrent video submission detected, keeping first record");
                Ok(existing)
            }
        }
    }

    /// 合并音频与视频
    pub async fn merge(&self, dto: MergeRequestDto) -> Result<MergeResult, PipelineError> {
        dto.validate()?;
        let task_id = dto.task_id.trim();

        if let Some(existing) = self.video_repo.find_by_task_id(task_id).await? {
            if let Some(s3_url) = existing.merged_video_url {
                info!(task_id = %task_id, "Merge already completed, returning existing url");
                return Ok(MergeResult { s3_url });
            }
        }

        let video = self.video_repo.find_latest_with_video(task_id).await?;
        let music = self.music_repo.find_latest_with_audio(task_id).await?;

        let video_url = video
            .and_then(|v| v.video_url)
            .ok_or_else(|| PipelineError::MissingDependency("video_url is not ready".to_string()))?;
        let audio_url = music
            .and_then(|m| m.audio_url)
            .ok_or_else(|| PipelineError::MissingDependency("audio_url is not ready".to_string()))?;

        let s3_url = self
            .merge_service
            .merge(&MergeRequest {
                audio_url,
                video_url,
            })
            .await
            .map_err(|e| {
                Self::record_failure(Stage::Merge, task_id, &e);
                e
            })?;
        counter!("generation_submissions_total", "stage" => Stage::Merge.to_string()).increment(1);

        self.video_repo
            .patch_by_task_id(task_id, &GenerationPatch::merged(s3_url.clone()))
            .await?;
        info!(task_id = %task_id, s3_url = %s3_url, "Merge completed");

        Ok(MergeResult { s3_url })
    }
}

#[cfg(test)]
#[path = "generation_use_case_test.rs"]
mod tests;
