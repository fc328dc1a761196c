// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::generation::{
    GenerationPatch, GenerationStatus, GenerationTask, VideoGenerationTask,
};
use crate::domain::repositories::generation_repository::{
    MusicTaskRepository, VideoTaskRepository,
};
use crate::domain::repositories::{CreateOutcome, RepositoryError};
use crate::infrastructure::database::entities::{raw_music, raw_video};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

const TIMEOUT_MESSAGE: &str = "generation timed out";

/// 音乐任务仓库实现
#[derive(Clone)]
pub struct MusicTaskRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MusicTaskRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<raw_music::Model> for GenerationTask {
    fn from(model: raw_music::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            music_task_id: model.music_task_id,
            user_address: model.user_address,
            prompt: model.prompt,
            genre: model.genre,
            audio_url: model.audio_url,
            image_url: model.image_url,
            status: model.status.parse().unwrap_or_default(),
            is_completed: model.is_completed,
            error_message: model.error_message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&GenerationTask> for raw_music::ActiveModel {
    fn from(task: &GenerationTask) -> Self {
        Self {
            task_id: Set(task.task_id.clone()),
            music_task_id: Set(task.music_task_id.clone()),
            user_address: Set(task.user_address.clone()),
            prompt: Set(task.prompt.clone()),
            genre: Set(task.genre.clone()),
            audio_url: Set(task.audio_url.clone()),
            image_url: Set(task.image_url.clone()),
            status: Set(task.status.to_string()),
            is_completed: Set(task.is_completed),
            error_message: Set(task.error_message.clone()),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MusicTaskRepository for MusicTaskRepositoryImpl {
    async fn create_if_absent(
        &self,
        task: &GenerationTask,
    ) -> Result<CreateOutcome<GenerationTask>, RepositoryError> {
        let active: raw_music::ActiveModel = task.into();

        match active.insert(self.db.as_ref()).await {
            Ok(model) => Ok(CreateOutcome::Created(model.into())),
            Err(err) => {
                let err = RepositoryError::from(err);
                if !err.is_unique_violation() {
                    return Err(err);
                }
                let existing = self
                    .find_by_task_id(&task.task_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(CreateOutcome::Existing(existing))
            }
        }
    }

    async fn find_by_task_id(
        &self,
        task_id: &str,
    ) -> Result<Option<GenerationTask>, RepositoryError> {
        let model = raw_music::Entity::find()
            .filter(raw_music::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_music_task_id(
        &self,
        music_task_id: &str,
    ) -> Result<Option<GenerationTask>, RepositoryError> {
        let model = raw_music::Entity::find()
            .filter(raw_music::Column::MusicTaskId.eq(music_task_id))
            .order_by_desc(raw_music::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_latest_with_audio(
        &self,
        task_id: &str,
    ) -> Result<Option<GenerationTask>, RepositoryError> {
        let model = raw_music::Entity::find()
            .filter(raw_music::Column::TaskId.eq(task_id))
            .filter(raw_music::Column::AudioUrl.is_not_null())
            .order_by_desc(raw_music::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn patch_by_task_id(
        &self,
        task_id: &str,
        patch: &GenerationPatch,
    ) -> Result<GenerationTask, RepositoryError> {
        let mut active: raw_music::ActiveModel = raw_music::Entity::find()
            .filter(raw_music::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        if let Some(audio_url) = &patch.audio_url {
            active.audio_url = Set(Some(audio_url.clone()));
        }
        if let Some(image_url) = &patch.image_url {
            active.image_url = Set(Some(image_url.clone()));
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(is_completed) = patch.is_completed {
            active.is_completed = Set(is_completed);
        }
        match &patch.error_message {
            Some(message) => active.error_message = Set(Some(message.clone())),
            None if patch.clears_error() => active.error_message = Set(None),
            None => {}
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let cutoff: DateTime<FixedOffset> = cutoff.into();
        let now: DateTime<FixedOffset> = Utc::now().into();

        let result = raw_music::Entity::update_many()
            .col_expr(
                raw_music::Column::Status,
                Expr::value(GenerationStatus::Failed.to_string()),
            )
            .col_expr(
                raw_music::Column::ErrorMessage,
                Expr::value(TIMEOUT_MESSAGE.to_string()),
            )
            .col_expr(raw_music::Column::UpdatedAt, Expr::value(now))
            .filter(raw_music::Column::Status.eq(GenerationStatus::Pending.to_string()))
            .filter(raw_music::Column::CreatedAt.lt(cutoff))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

/// 视频任务仓库实现
#[derive(Clone)]
pub struct VideoTaskRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl VideoTaskRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<raw_video::Model> for VideoGenerationTask {
    fn from(model: raw_video::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            video_task_id: model.video_task_id,
            user_address: model.user_address,
            prompt: model.prompt,
            style: model.style,
            video_url: model.video_url,
            merged_video_url: model.merged_video_url,
            status: model.status.parse().unwrap_or_default(),
            is_completed: model.is_completed,
            error_message: model.error_message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&VideoGenerationTask> for raw_video::ActiveModel {
    fn from(task: &VideoGenerationTask) -> Self {
        Self {
            task_id: Set(task.task_id.clone()),
            video_task_id: Set(task.video_task_id.clone()),
            user_address: Set(task.user_address.clone()),
            prompt: Set(task.prompt.clone()),
            style: Set(task.style.clone()),
            video_url: Set(task.video_url.clone()),
            merged_video_url: Set(task.merged_video_url.clone()),
            status: Set(task.status.to_string()),
            is_completed: Set(task.is_completed),
            error_message: Set(task.error_message.clone()),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
            ..Default::default()
        }
    }
}

#[async_trait]
impl VideoTaskRepository for VideoTaskRepositoryImpl {
    async fn create_if_absent(
        &self,
        task: &VideoGenerationTask,
    ) -> Result<CreateOutcome<VideoGenerationTask>, RepositoryError> {
        let active: raw_video::ActiveModel = task.into();

        match active.insert(self.db.as_ref()).await {
            Ok(model) => Ok(CreateOutcome::Created(model.into())),
            Err(err) => {
                let err = RepositoryError::from(err);
                if !err.is_unique_violation() {
                    return Err(err);
                }
                let existing = self
                    .find_by_task_id(&task.task_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(CreateOutcome::Existing(existing))
            }
        }
    }

    async fn find_by_task_id(
        &self,
        task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError> {
        let model = raw_video::Entity::find()
            .filter(raw_video::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_video_task_id(
        &self,
        video_task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError> {
        let model = raw_video::Entity::find()
            .filter(raw_video::Column::VideoTaskId.eq(video_task_id))
            .order_by_desc(raw_video::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_latest_with_video(
        &self,
        task_id: &str,
    ) -> Result<Option<VideoGenerationTask>, RepositoryError> {
        let model = raw_video::Entity::find()
            .filter(raw_video::Column::TaskId.eq(task_id))
            .filter(raw_video::Column::VideoUrl.is_not_null())
            .order_by_desc(raw_video::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn patch_by_task_id(
        &self,
        task_id: &str,
        patch: &GenerationPatch,
    ) -> Result<VideoGenerationTask, RepositoryError> {
        let mut active: raw_video::ActiveModel = raw_video::Entity::find()
            .filter(raw_video::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        if let Some(video_url) = &patch.video_url {
            active.video_url = Set(Some(video_url.clone()));
        }
        if let Some(merged) = &patch.merged_video_url {
            active.merged_video_url = Set(Some(merged.clone()));
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(is_completed) = patch.is_completed {
            active.is_completed = Set(is_completed);
        }
        match &patch.error_message {
            Some(message) => active.error_message = Set(Some(message.clone())),
            None if patch.clears_error() => active.error_message = Set(None),
            None => {}
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn expire_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let cutoff: DateTime<FixedOffset> = cutoff.into();
        let now: DateTime<FixedOffset> = Utc::now().into();

        let result = raw_video::Entity::update_many()
            .col_expr(
                raw_video::Column::Status,
                Expr::value(GenerationStatus::Failed.to_string()),
            )
            .col_expr(
                raw_video::Column::ErrorMessage,
                Expr::value(TIMEOUT_MESSAGE.to_string()),
            )
            .col_expr(raw_video::Column::UpdatedAt, Expr::value(now))
            .filter(raw_video::Column::Status.eq(GenerationStatus::Pending.to_string()))
            .filter(raw_video::Column::CreatedAt.lt(cutoff))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}
