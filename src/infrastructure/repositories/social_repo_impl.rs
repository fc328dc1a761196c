// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::video::Comment;
use crate::domain::repositories::social_repository::SocialRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{comment, video, video_like};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 社交仓库实现
///
/// 点赞行与计数器在同一事务中更新，事务内只使用 `txn`
#[derive(Clone)]
pub struct SocialRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SocialRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<comment::Model> for Comment {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            video_id: model.video_id,
            user_address: model.user_address,
            content: model.content,
            parent_id: model.parent_id,
            created_at: model.created_at,
        }
    }
}

async fn current_like_count(
    txn: &DatabaseTransaction,
    video_id: Uuid,
) -> Result<i64, RepositoryError> {
    let video = video::Entity::find_by_id(video_id)
        .one(txn)
        .await?
        .ok_or(RepositoryError::NotFound)?;
    Ok(video.like_count)
}

#[async_trait]
impl SocialRepository for SocialRepositoryImpl {
    async fn like(&self, user_id: &str, video_id: Uuid) -> Result<Option<i64>, RepositoryError> {
        let txn = self.db.begin().await?;

        if video::Entity::find_by_id(video_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        let existing = video_like::Entity::find()
            .filter(video_like::Column::UserId.eq(user_id))
            .filter(video_like::Column::VideoId.eq(video_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            txn.rollback().await?;
            return Ok(None);
        }

        let like = video_like::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            video_id: Set(video_id),
            created_at: Set(Utc::now().into()),
        };
        if let Err(err) = like.insert(&txn).await {
            let err = RepositoryError::from(err);
            txn.rollback().await?;
            // 并发点赞由唯一约束兜底
            return if err.is_unique_violation() {
                Ok(None)
            } else {
                Err(err)
            };
        }

        video::Entity::update_many()
            .col_expr(
                video::Column::LikeCount,
                Expr::col(video::Column::LikeCount).add(1),
            )
            .filter(video::Column::Id.eq(video_id))
            .exec(&txn)
            .await?;

        let like_count = current_like_count(&txn, video_id).await?;
        txn.commit().await?;

        Ok(Some(like_count))
    }

    async fn unlike(&self, user_id: &str, video_id: Uuid) -> Result<Option<i64>, RepositoryError> {
        let txn = self.db.begin().await?;

        if video::Entity::find_by_id(video_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        let deleted = video_like::Entity::delete_many()
            .filter(video_like::Column::UserId.eq(user_id))
            .filter(video_like::Column::VideoId.eq(video_id))
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        video::Entity::update_many()
            .col_expr(
                video::Column::LikeCount,
                Expr::col(video::Column::LikeCount).sub(1),
            )
            .filter(video::Column::Id.eq(video_id))
            .filter(video::Column::LikeCount.gt(0))
            .exec(&txn)
            .await?;

        let like_count = current_like_count(&txn, video_id).await?;
        txn.commit().await?;

        Ok(Some(like_count))
    }

    async fn has_liked(&self, user_id: &str, video_id: Uuid) -> Result<bool, RepositoryError> {
        let count = video_like::Entity::find()
            .filter(video_like::Column::UserId.eq(user_id))
            .filter(video_like::Column::VideoId.eq(video_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn create_comment(&self, comment: &Comment) -> Result<Comment, RepositoryError> {
        let active = comment::ActiveModel {
            id: Set(comment.id),
            video_id: Set(comment.video_id),
            user_address: Set(comment.user_address.clone()),
            content: Set(comment.content.clone()),
            parent_id: Set(comment.parent_id),
            created_at: Set(comment.created_at),
        };

        let model = active.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
        let model = comment::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list_comments(&self, video_id: Uuid) -> Result<Vec<Comment>, RepositoryError> {
        let models = comment::Entity::find()
            .filter(comment::Column::VideoId.eq(video_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
