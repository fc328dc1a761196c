// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mint_job::{MintJob, MintJobStatus, MintProgress, MintRequest};
use crate::domain::repositories::mint_job_repository::MintJobRepository;
use crate::domain::repositories::{CreateOutcome, RepositoryError};
use crate::infrastructure::database::entities::mint_job;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 认领冲突时的最大重试次数
const CLAIM_ATTEMPTS: usize = 3;

/// 铸造作业仓库实现
#[derive(Clone)]
pub struct MintJobRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MintJobRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: MintJobStatus,
        attempt_count: i32,
        error: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();

        let mut update = mint_job::Entity::update_many()
            .col_expr(mint_job::Column::Status, Expr::value(status.to_string()))
            .col_expr(mint_job::Column::AttemptCount, Expr::value(attempt_count))
            .col_expr(mint_job::Column::UpdatedAt, Expr::value(now));

        if let Some(error) = error {
            update = update.col_expr(mint_job::Column::LastError, Expr::value(error.to_string()));
        }
        if status == MintJobStatus::Completed {
            update = update.col_expr(mint_job::Column::CompletedAt, Expr::value(Some(now)));
        }

        let result = update
            .filter(mint_job::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl TryFrom<mint_job::Model> for MintJob {
    type Error = RepositoryError;

    fn try_from(model: mint_job::Model) -> Result<Self, Self::Error> {
        let request: MintRequest = serde_json::from_value(model.payload)?;
        Ok(Self {
            id: model.id,
            video_id: model.video_id,
            request,
            status: model.status.parse().unwrap_or_default(),
            attempt_count: model.attempt_count,
            last_error: model.last_error,
            locked_at: model.locked_at,
            progress: MintProgress {
                metadata_uri: model.metadata_uri,
                mint_address: model.mint_address,
                token_account: model.token_account,
                transfer_signature: model.transfer_signature,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
            completed_at: model.completed_at,
        })
    }
}

impl TryFrom<&MintJob> for mint_job::ActiveModel {
    type Error = RepositoryError;

    fn try_from(job: &MintJob) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(job.id),
            video_id: Set(job.video_id),
            payload: Set(serde_json::to_value(&job.request)?),
            status: Set(job.status.to_string()),
            attempt_count: Set(job.attempt_count),
            last_error: Set(job.last_error.clone()),
            locked_at: Set(job.locked_at),
            metadata_uri: Set(job.progress.metadata_uri.clone()),
            mint_address: Set(job.progress.mint_address.clone()),
            token_account: Set(job.progress.token_account.clone()),
            transfer_signature: Set(job.progress.transfer_signature.clone()),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
            completed_at: Set(job.completed_at),
        })
    }
}

#[async_trait]
impl MintJobRepository for MintJobRepositoryImpl {
    async fn enqueue(&self, job: &MintJob) -> Result<CreateOutcome<MintJob>, RepositoryError> {
        let active = mint_job::ActiveModel::try_from(job)?;

        match active.insert(self.db.as_ref()).await {
            Ok(model) => Ok(CreateOutcome::Created(model.try_into()?)),
            Err(err) => {
                let err = RepositoryError::from(err);
                if !err.is_unique_violation() {
                    return Err(err);
                }
                let existing = self
                    .find_by_video_id(job.video_id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(CreateOutcome::Existing(existing))
            }
        }
    }

    async fn claim_next(&self) -> Result<Option<MintJob>, RepositoryError> {
        for _ in 0..CLAIM_ATTEMPTS {
            let candidate = mint_job::Entity::find()
                .filter(mint_job::Column::Status.eq(MintJobStatus::Pending.to_string()))
                .order_by_asc(mint_job::Column::CreatedAt)
                .one(self.db.as_ref())
                .await?;

            let Some(candidate) = candidate else {
                return Ok(None);
            };

            let now: DateTime<FixedOffset> = Utc::now().into();
            // 条件更新：只有仍处于 pending 的行才会被本次认领
            let result = mint_job::Entity::update_many()
                .col_expr(
                    mint_job::Column::Status,
                    Expr::value(MintJobStatus::Running.to_string()),
                )
                .col_expr(mint_job::Column::LockedAt, Expr::value(Some(now)))
                .col_expr(mint_job::Column::UpdatedAt, Expr::value(now))
                .filter(mint_job::Column::Id.eq(candidate.id))
                .filter(mint_job::Column::Status.eq(MintJobStatus::Pending.to_string()))
                .exec(self.db.as_ref())
                .await?;

            if result.rows_affected == 1 {
                let mut job: MintJob = candidate.try_into()?;
                job.status = MintJobStatus::Running;
                job.locked_at = Some(now);
                job.updated_at = now;
                return Ok(Some(job));
            }
        }

        Ok(None)
    }

    async fn record_attempt(
        &self,
        id: Uuid,
        attempt_count: i32,
        error: &str,
    ) -> Result<(), RepositoryError> {
        self.set_status(id, MintJobStatus::Running, attempt_count, Some(error))
            .await
    }

    async fn save_progress(&self, id: Uuid, progress: &MintProgress) -> Result<(), RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let result = mint_job::Entity::update_many()
            .col_expr(
                mint_job::Column::MetadataUri,
                Expr::value(progress.metadata_uri.clone()),
            )
            .col_expr(
                mint_job::Column::MintAddress,
                Expr::value(progress.mint_address.clone()),
            )
            .col_expr(
                mint_job::Column::TokenAccount,
                Expr::value(progress.token_account.clone()),
            )
            .col_expr(
                mint_job::Column::TransferSignature,
                Expr::value(progress.transfer_signature.clone()),
            )
            .col_expr(mint_job::Column::UpdatedAt, Expr::value(now))
            .filter(mint_job::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid, attempt_count: i32) -> Result<(), RepositoryError> {
        self.set_status(id, MintJobStatus::Completed, attempt_count, None)
            .await
    }

    async fn mark_failed(
        &self,
        id: Uuid,
        attempt_count: i32,
        error: &str,
    ) -> Result<(), RepositoryError> {
        self.set_status(id, MintJobStatus::Failed, attempt_count, Some(error))
            .await
    }

    async fn reset_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let cutoff: DateTime<FixedOffset> = cutoff.into();
        let now: DateTime<FixedOffset> = Utc::now().into();

        let result = mint_job::Entity::update_many()
            .col_expr(
                mint_job::Column::Status,
                Expr::value(MintJobStatus::Pending.to_string()),
            )
            .col_expr(
                mint_job::Column::LockedAt,
                Expr::value(Option::<DateTime<FixedOffset>>::None),
            )
            .col_expr(mint_job::Column::UpdatedAt, Expr::value(now))
            .filter(mint_job::Column::Status.eq(MintJobStatus::Running.to_string()))
            .filter(mint_job::Column::LockedAt.lte(cutoff))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn find_by_video_id(&self, video_id: Uuid) -> Result<Option<MintJob>, RepositoryError> {
        let model = mint_job::Entity::find()
            .filter(mint_job::Column::VideoId.eq(video_id))
            .one(self.db.as_ref())
            .await?;

        model.map(TryInto::try_into).transpose()
    }
}
