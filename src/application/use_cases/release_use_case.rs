// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::release_request::{NftStatus, ReleaseRequestDto, ReleaseResponse};
use crate::application::use_cases::errors::PipelineError;
use crate::domain::models::mint_job::{MintJob, MintRequest, NftAttribute};
use crate::domain::models::token::Token;
use crate::domain::models::video::{Video, VideoStatus};
use crate::domain::repositories::mint_job_repository::MintJobRepository;
use crate::domain::repositories::token_repository::TokenRepository;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::repositories::CreateOutcome;
use crate::domain::services::indexer::{AssetIndexer, AssetMetadata};
use metrics::counter;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const PLACEHOLDER_NAME: &str = "Unknown Token";
const PLACEHOLDER_SYMBOL: &str = "UNKNOWN";

/// 发布用例
///
/// 持久化 Token / Video 并写入铸造作业，HTTP 响应不等待铸造完成。
pub struct ReleaseUseCase {
    token_repo: Arc<dyn TokenRepository>,
    video_repo: Arc<dyn VideoRepository>,
    mint_job_repo: Arc<dyn MintJobRepository>,
    indexer: Arc<dyn AssetIndexer>,
    mint_notify: Arc<Notify>,
}

impl ReleaseUseCase {
    pub fn new(
        token_repo: Arc<dyn TokenRepository>,
        video_repo: Arc<dyn VideoRepository>,
        mint_job_repo: Arc<dyn MintJobRepository>,
        indexer: Arc<dyn AssetIndexer>,
        mint_notify: Arc<Notify>,
    ) -> Self {
        Self {
            token_repo,
            video_repo,
            mint_job_repo,
            indexer,
            mint_notify,
        }
    }

    /// 补全代币元数据，索引服务不可用时返回空
    async fn enrich(&self, mint: &str) -> AssetMetadata {
        match self.indexer.get_asset(mint).await {
            Ok(Some(metadata)) => metadata,
            Ok(None) => AssetMetadata::default(),
            Err(e) => {
                warn!(mint = %mint, error = %e, "Token metadata lookup failed, using placeholders");
                AssetMetadata::default()
            }
        }
    }

    fn build_token(dto: &ReleaseRequestDto, metadata: AssetMetadata, existing: Option<&Token>) -> Token {
        let mut token = Token::new(
            dto.token_address.trim().to_string(),
            dto.token_name
                .clone()
                .or(metadata.name)
                .or_else(|| existing.map(|t| t.name.clone()))
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            dto.token_symbol
                .clone()
                .or(metadata.symbol)
                .or_else(|| existing.map(|t| t.symbol.clone()))
                .unwrap_or_else(|| PLACEHOLDER_SYMBOL.to_string()),
        );
        token.description = metadata.description;
        token.image_url = metadata.image_url;
        token.creator = metadata.creator.or_else(|| dto.wallet_address.clone());
        token.market_cap = dto
            .market_cap
            .or(metadata.market_cap)
            .or_else(|| existing.map(|t| t.market_cap))
            .unwrap_or(0.0);
        token.twitter = dto.twitter.clone().or(metadata.twitter);
        token.telegram = dto.telegram.clone().or(metadata.telegram);
        token.website = dto.website.clone().or(metadata.website);
        token
    }

    fn mint_request(video: &Video, token: &Token, destination_wallet: String) -> MintRequest {
        MintRequest {
            video_id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            image_url: video.thumbnail_url.clone().or_else(|| token.image_url.clone()),
            animation_url: video.url.clone(),
            token_mint: token.mint.clone(),
            token_symbol: token.symbol.clone(),
            destination_wallet,
            attributes: vec![
                NftAttribute {
                    trait_type: "token".to_string(),
                    value: token.mint.clone(),
                },
                NftAttribute {
                    trait_type: "symbol".to_string(),
                    value: token.symbol.clone(),
                },
            ],
        }
    }

    /// 已发布但仍在 processing 且没有铸造作业的视频补写作业
    async fn ensure_mint_job(
        &self,
        video: &Video,
        wallet_address: Option<&str>,
    ) -> Result<(), PipelineError> {
        if video.status != VideoStatus::Processing
            || self.mint_job_repo.find_by_video_id(video.id).await?.is_some()
        {
            return Ok(());
        }

        let Some(destination_wallet) = wallet_address
            .or(video.creator.as_deref())
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
        else {
            return Ok(());
        };
        let token = self
            .token_repo
            .find_by_id(video.token_id)
            .await?
            .ok_or_else(|| PipelineError::NotFound("token".to_string()))?;

        let job = MintJob::new(Self::mint_request(video, &token, destination_wallet));
        if self.mint_job_repo.enqueue(&job).await?.is_created() {
            warn!(video_id = %video.id, "Re-enqueued missing mint job");
            self.mint_notify.notify_one();
        }
        Ok(())
    }

    /// 发布视频
    pub async fn release(&self, dto: ReleaseRequestDto) -> Result<ReleaseResponse, PipelineError> {
        dto.validate()?;

        let task_id = dto
            .task_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        if let Some(task_id) = &task_id {
            if let Some(existing) = self.video_repo.find_by_task_id(task_id).await? {
                info!(task_id = %task_id, video_id = %existing.id, "Release already processed");
                self.ensure_mint_job(&existing, dto.wallet_address.as_deref())
                    .await?;
                return Ok(ReleaseResponse {
                    success: true,
                    token_id: existing.token_id,
                    video_id: existing.id,
                });
            }
        }

        let mint = dto.token_address.trim();
        let metadata = self.enrich(mint).await;
        let existing_token = self.token_repo.find_by_mint(mint).await?;
        let token = Self::build_token(&dto, metadata, existing_token.as_ref());
        let token = self.token_repo.upsert_by_mint(&token).await?;

        let mut video = Video::new(token.id, dto.title.clone(), dto.url.clone());
        video.task_id = task_id;
        video.description = dto.description.clone();
        video.thumbnail_url = dto.thumbnail_url.clone();
        video.duration = dto.duration;
        video.creator = dto.wallet_address.clone();

        let destination = dto
            .wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string);
        let job = match destination {
            Some(wallet) => Some(MintJob::new(Self::mint_request(&video, &token, wallet))),
            None => {
                // 没有接收钱包时只发布，不铸造
                video.status = VideoStatus::Ready;
                None
            }
        };

        let video = match self
            .video_repo
            .create_with_mint_job(&video, job.as_ref())
            .await?
        {
            CreateOutcome::Created(video) => video,
            CreateOutcome::Existing(existing) => {
                warn!(video_id = %existing.id, "Concurrent release detected, returning existing video");
                self.ensure_mint_job(&existing, dto.wallet_address.as_deref())
                    .await?;
                return Ok(ReleaseResponse {
                    success: true,
                    token_id: existing.token_id,
                    video_id: existing.id,
                });
            }
        };

        if job.is_some() {
            self.mint_notify.notify_one();
        }

        counter!("releases_total").increment(1);
        info!(video_id = %video.id, token_id = %token.id, mint = %token.mint, "Video released");

        Ok(ReleaseResponse {
            success: true,
            token_id: token.id,
            video_id: video.id,
        })
    }

    /// 查询视频对应的 NFT
    pub async fn nft_status(&self, video_id: Uuid) -> Result<NftStatus, PipelineError> {
        let video = self
            .video_repo
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| PipelineError::NotFound("video".to_string()))?;

        match (video.nft_address, video.status) {
            (Some(nft_address), status) => Ok(NftStatus {
                nft_address,
                status: status.to_string(),
            }),
            (None, VideoStatus::Failed) => {
                Err(PipelineError::GenerationFailed("nft mint failed".to_string()))
            }
            (None, _) => Err(PipelineError::NotReady("nft is not minted yet".to_string())),
        }
    }
}

#[cfg(test)]
#[path = "release_use_case_test.rs"]
mod tests;
