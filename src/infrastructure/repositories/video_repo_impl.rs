// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mint_job::MintJob;
use crate::domain::models::video::{CreatorStats, Video, VideoStatus};
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::repositories::{CreateOutcome, RepositoryError};
use crate::infrastructure::database::entities::{mint_job, video};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::{Alias, Expr, Func, Order, SimpleExpr};
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 视频仓库实现
#[derive(Clone)]
pub struct VideoRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl VideoRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: VideoStatus,
        nft_address: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let mut update = video::Entity::update_many()
            .col_expr(video::Column::Status, Expr::value(status.to_string()))
            .col_expr(video::Column::UpdatedAt, Expr::value(now));

        if let Some(address) = nft_address {
            update = update.col_expr(video::Column::NftAddress, Expr::value(address.to_string()));
        }

        let result = update
            .filter(video::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl From<video::Model> for Video {
    fn from(model: video::Model) -> Self {
        Self {
            id: model.id,
            token_id: model.token_id,
            task_id: model.task_id,
            title: model.title,
            description: model.description,
            url: model.url,
            thumbnail_url: model.thumbnail_url,
            duration: model.duration,
            status: model.status.parse().unwrap_or_default(),
            nft_address: model.nft_address,
            creator: model.creator,
            play_count: model.play_count,
            like_count: model.like_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Video> for video::ActiveModel {
    fn from(video: &Video) -> Self {
        Self {
            id: Set(video.id),
            token_id: Set(video.token_id),
            task_id: Set(video.task_id.clone()),
            title: Set(video.title.clone()),
            description: Set(video.description.clone()),
            url: Set(video.url.clone()),
            thumbnail_url: Set(video.thumbnail_url.clone()),
            duration: Set(video.duration),
            status: Set(video.status.to_string()),
            nft_address: Set(video.nft_address.clone()),
            creator: Set(video.creator.clone()),
            play_count: Set(video.play_count),
            like_count: Set(video.like_count),
            created_at: Set(video.created_at),
            updated_at: Set(video.updated_at),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CreatorRow {
    creator: String,
    video_count: i64,
    total_likes: i64,
    total_plays: i64,
}

#[async_trait]
impl VideoRepository for VideoRepositoryImpl {
    async fn create_with_mint_job(
        &self,
        video: &Video,
        job: Option<&MintJob>,
    ) -> Result<CreateOutcome<Video>, RepositoryError> {
        let active: video::ActiveModel = video.into();
        let job_model = job.map(mint_job::ActiveModel::try_from).transpose()?;

        let txn = self.db.begin().await?;
        let model = match active.insert(&txn).await {
            Ok(model) => model,
            Err(err) => {
                let err = RepositoryError::from(err);
                // 先释放事务连接再查询已有记录
                txn.rollback().await?;
                let task_id = match &video.task_id {
                    Some(task_id) if err.is_unique_violation() => task_id,
                    _ => return Err(err),
                };
                let existing = self
                    .find_by_task_id(task_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                return Ok(CreateOutcome::Existing(existing));
            }
        };

        if let Some(job_model) = job_model {
            if let Err(err) = job_model.insert(&txn).await {
                txn.rollback().await?;
                return Err(err.into());
            }
        }
        txn.commit().await?;

        Ok(CreateOutcome::Created(model.into()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, RepositoryError> {
        let model = video::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_task_id(&self, task_id: &str) -> Result<Option<Video>, RepositoryError> {
        let model = video::Entity::find()
            .filter(video::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn mark_minted(&self, id: Uuid, nft_address: &str) -> Result<(), RepositoryError> {
        self.set_status(id, VideoStatus::Completed, Some(nft_address))
            .await
    }

    async fn mark_failed(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.set_status(id, VideoStatus::Failed, None).await
    }

    async fn increment_play_count(&self, id: Uuid) -> Result<i64, RepositoryError> {
        let result = video::Entity::update_many()
            .col_expr(
                video::Column::PlayCount,
                Expr::col(video::Column::PlayCount).add(1),
            )
            .filter(video::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        let video = video::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(video.play_count)
    }

    async fn leaderboard(&self, limit: u64) -> Result<Vec<CreatorStats>, RepositoryError> {
        // SUM 在 Postgres 上返回 numeric，统一转为 BIGINT
        let rows = video::Entity::find()
            .select_only()
            .column(video::Column::Creator)
            .column_as(
                SimpleExpr::from(Func::cast_as(
                    Func::count(Expr::col(video::Column::Id)),
                    Alias::new("BIGINT"),
                )),
                "video_count",
            )
            .column_as(
                SimpleExpr::from(Func::cast_as(
                    Func::sum(Expr::col(video::Column::LikeCount)),
                    Alias::new("BIGINT"),
                )),
                "total_likes",
            )
            .column_as(
                SimpleExpr::from(Func::cast_as(
                    Func::sum(Expr::col(video::Column::PlayCount)),
                    Alias::new("BIGINT"),
                )),
                "total_plays",
            )
            .filter(video::Column::Creator.is_not_null())
            .group_by(video::Column::Creator)
            .order_by(Expr::cust("total_likes"), Order::Desc)
            .order_by_asc(video::Column::Creator)
            .limit(limit)
            .into_model::<CreatorRow>()
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CreatorStats {
                creator: row.creator,
                video_count: row.video_count,
                total_likes: row.total_likes,
                total_plays: row.total_plays,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "video_repo_impl_test.rs"]
mod tests;
