// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::social_request::{
    CommentRequestDto, CommentThread, LikeRequestDto, LikeResponse, PlayResponse,
};
use crate::application::use_cases::errors::PipelineError;
use crate::domain::models::video::{Comment, CreatorStats};
use crate::domain::repositories::social_repository::SocialRepository;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::repositories::RepositoryError;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;
const MAX_LEADERBOARD_LIMIT: u64 = 100;

fn video_not_found(err: RepositoryError) -> PipelineError {
    match err {
        RepositoryError::NotFound => PipelineError::NotFound("video".to_string()),
        other => other.into(),
    }
}

/// 社交用例：点赞、评论、播放计数与排行榜
pub struct SocialUseCase {
    social_repo: Arc<dyn SocialRepository>,
    video_repo: Arc<dyn VideoRepository>,
}

impl SocialUseCase {
    pub fn new(social_repo: Arc<dyn SocialRepository>, video_repo: Arc<dyn VideoRepository>) -> Self {
        Self {
            social_repo,
            video_repo,
        }
    }

    pub async fn like(
        &self,
        video_id: Uuid,
        dto: LikeRequestDto,
    ) -> Result<LikeResponse, PipelineError> {
        dto.validate()?;
        let like_count = self
            .social_repo
            .like(dto.user_id.trim(), video_id)
            .await
            .map_err(video_not_found)?
            .ok_or(PipelineError::AlreadyLiked)?;

        Ok(LikeResponse {
            success: true,
            liked: true,
            like_count,
        })
    }

    pub async fn unlike(
        &self,
        video_id: Uuid,
        dto: LikeRequestDto,
    ) -> Result<LikeResponse, PipelineError> {
        dto.validate()?;
        let like_count = self
            .social_repo
            .unlike(dto.user_id.trim(), video_id)
            .await
            .map_err(video_not_found)?
            .ok_or(PipelineError::NotLiked)?;

        Ok(LikeResponse {
            success: true,
            liked: false,
            like_count,
        })
    }

    /// 发表评论，回复只允许一层
    pub async fn add_comment(
        &self,
        video_id: Uuid,
        dto: CommentRequestDto,
    ) -> Result<Comment, PipelineError> {
        dto.validate()?;

        if self.video_repo.find_by_id(video_id).await?.is_none() {
            return Err(PipelineError::NotFound("video".to_string()));
        }

        if let Some(parent_id) = dto.parent_id {
            let parent = self
                .social_repo
                .find_comment(parent_id)
                .await?
                .ok_or_else(|| PipelineError::NotFound("parent comment".to_string()))?;
            if parent.video_id != video_id {
                return Err(PipelineError::ValidationError(
                    "parent comment belongs to another video".to_string(),
                ));
            }
            if parent.parent_id.is_some() {
                return Err(PipelineError::ValidationError(
                    "replies can only be one level deep".to_string(),
                ));
            }
        }

        let comment = Comment::new(
            video_id,
            dto.user_address.trim().to_string(),
            dto.content.trim().to_string(),
            dto.parent_id,
        );
        Ok(self.social_repo.create_comment(&comment).await?)
    }

    /// 顶层评论按时间升序，各自附带回复
    pub async fn list_comments(&self, video_id: Uuid) -> Result<Vec<CommentThread>, PipelineError> {
        let comments = self.social_repo.list_comments(video_id).await?;

        let mut replies: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        let mut top_level = Vec::new();
        for comment in comments {
            match comment.parent_id {
                Some(parent_id) => replies.entry(parent_id).or_default().push(comment),
                None => top_level.push(comment),
            }
        }

        Ok(top_level
            .into_iter()
            .map(|comment| CommentThread {
                replies: replies.remove(&comment.id).unwrap_or_default(),
                comment,
            })
            .collect())
    }

    pub async fn record_play(&self, video_id: Uuid) -> Result<PlayResponse, PipelineError> {
        let play_count = self
            .video_repo
            .increment_play_count(video_id)
            .await
            .map_err(video_not_found)?;
        Ok(PlayResponse {
            success: true,
            play_count,
        })
    }

    pub async fn leaderboard(&self, limit: Option<u64>) -> Result<Vec<CreatorStats>, PipelineError> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT);
        Ok(self.video_repo.leaderboard(limit).await?)
    }
}

#[cfg(test)]
#[path = "social_use_case_test.rs"]
mod tests;
