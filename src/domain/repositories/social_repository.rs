// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::video::Comment;
use async_trait::async_trait;
use uuid::Uuid;

/// 社交仓库特质
///
/// 点赞行与 `videos.like_count` 在同一事务内维护。
#[async_trait]
pub trait SocialRepository: Send + Sync {
    /// 点赞；已点赞返回 `Ok(None)`，成功返回新的点赞数
    async fn like(&self, user_id: &str, video_id: Uuid) -> Result<Option<i64>, RepositoryError>;
    /// 取消点赞；未点赞返回 `Ok(None)`，成功返回新的点赞数
    async fn unlike(&self, user_id: &str, video_id: Uuid) -> Result<Option<i64>, RepositoryError>;
    async fn has_liked(&self, user_id: &str, video_id: Uuid) -> Result<bool, RepositoryError>;
    async fn create_comment(&self, comment: &Comment) -> Result<Comment, RepositoryError>;
    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError>;
    /// 按创建时间升序列出视频的全部评论
    async fn list_comments(&self, video_id: Uuid) -> Result<Vec<Comment>, RepositoryError>;
}
