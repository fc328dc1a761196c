// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mint_job::{MintJob, MintProgress, MintRequest};
use crate::domain::models::webhook::{WebhookEvent, WebhookEventType};
use crate::domain::repositories::mint_job_repository::MintJobRepository;
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::chain::{ChainError, ChainErrorCode, ChainProgram};
use crate::utils::retry_policy::RetryPolicy;
use chrono::Utc;
use metrics::{counter, histogram};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const METADATA_PREFIX: &str = "nft-metadata";

/// 单个作业的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum MintOutcome {
    /// 铸造并转账成功，携带 mint 地址
    Minted(String),
    /// 终止失败
    Failed(ChainError),
}

/// NFT 铸造工作器
///
/// 消费 mint_jobs 发件箱：认领作业、上传元数据、铸造、创建关联账户并转账。
pub struct MintWorker {
    job_repo: Arc<dyn MintJobRepository>,
    video_repo: Arc<dyn VideoRepository>,
    webhook_repo: Arc<dyn WebhookEventRepository>,
    storage: Arc<dyn StorageRepository>,
    chain: Arc<dyn ChainProgram>,
    notify: Arc<Notify>,
    policy: RetryPolicy,
    poll_interval: Duration,
    lock_timeout: Duration,
    alert_url: Option<String>,
    alert_max_retries: i32,
}

impl MintWorker {
    pub fn new(
        job_repo: Arc<dyn MintJobRepository>,
        video_repo: Arc<dyn VideoRepository>,
        webhook_repo: Arc<dyn WebhookEventRepository>,
        storage: Arc<dyn StorageRepository>,
        chain: Arc<dyn ChainProgram>,
        notify: Arc<Notify>,
    ) -> Self {
        Self {
            job_repo,
            video_repo,
            webhook_repo,
            storage,
            chain,
            notify,
            policy: RetryPolicy::mint(),
            poll_interval: Duration::from_secs(10),
            lock_timeout: Duration::from_secs(600),
            alert_url: None,
            alert_max_retries: 5,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_intervals(mut self, poll_interval: Duration, lock_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.lock_timeout = lock_timeout;
        self
    }

    /// 设置后终止失败会写入告警事件
    pub fn with_alerts(mut self, webhook_url: Option<String>, max_retries: i32) -> Self {
        self.alert_url = webhook_url.filter(|url| !url.trim().is_empty());
        self.alert_max_retries = max_retries;
        self
    }

    /// 运行铸造循环
    ///
    /// 被唤醒或轮询到期时清空待处理作业；轮询时顺带回收超时的 running 作业。
    pub async fn run(&self) {
        info!("Mint worker started");
        self.recover_stale().await;

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.notify.notified() => {}
                _ = ticker.tick() => self.recover_stale().await,
            }
            self.drain().await;
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 处理所有可认领的作业，返回处理数量
    pub async fn drain(&self) -> usize {
        let mut processed = 0;
        loop {
            match self.job_repo.claim_next().await {
                Ok(Some(job)) => {
                    processed += 1;
                    if let Err(e) = self.process_job(job).await {
                        error!("Failed to persist mint job outcome: {}", e);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to claim mint job: {}", e);
                    break;
                }
            }
        }
        processed
    }

    async fn recover_stale(&self) {
        let lock_timeout = chrono::Duration::from_std(self.lock_timeout)
            .unwrap_or_else(|_| chrono::Duration::seconds(600));
        match self.job_repo.reset_stale(Utc::now() - lock_timeout).await {
            Ok(0) => {}
            Ok(count) => warn!("Re-queued {} stale mint jobs", count),
            Err(e) => error!("Failed to re-queue stale mint jobs: {}", e),
        }
    }

    /// 执行一个已认领的作业，瞬时错误按退避策略重试
    #[instrument(skip(self, job), fields(job_id = %job.id, video_id = %job.video_id))]
    pub async fn process_job(&self, job: MintJob) -> Result<MintOutcome, RepositoryError> {
        let started = Instant::now();
        let mut progress = job.progress.clone();
        if let Some(mint) = &progress.mint_address {
            info!(mint = %mint, "Resuming mint job from persisted progress");
        }
        let mut attempt_count = job.attempt_count;
        let mut retries: u32 = 0;

        loop {
            attempt_count += 1;
            counter!("mint_attempts_total").increment(1);

            match self.mint_once(job.id, &job.request, &mut progress).await {
                Ok(mint) => {
                    self.persist("mark_minted", || {
                        self.video_repo.mark_minted(job.video_id, &mint)
                    })
                    .await?;
                    self.persist("mark_completed", || {
                        self.job_repo.mark_completed(job.id, attempt_count)
                    })
                    .await?;

                    counter!("mint_success_total").increment(1);
                    histogram!("mint_duration_seconds").record(started.elapsed().as_secs_f64());
                    info!(mint = %mint, attempts = attempt_count, "NFT minted and transferred");
                    return Ok(MintOutcome::Minted(mint));
                }
                Err(e) => {
                    let transient = e.is_transient();
                    if transient && self.policy.should_retry(retries) {
                        retries += 1;
                        let backoff = self.policy.calculate_backoff(retries);
                        warn!(
                            attempt = attempt_count,
                            max_attempts = self.policy.max_attempts(),
                            backoff_ms = backoff.as_millis() as u64,
                            error = %e,
                            "Transient mint failure, retrying"
                        );
                        self.job_repo
                            .record_attempt(job.id, attempt_count, &e.message)
                            .await?;
                        sleep(backoff).await;
                        continue;
                    }

                    let reason = if transient {
                        "retries_exhausted".to_string()
                    } else {
                        e.code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "unclassified".to_string())
                    };
                    self.fail(&job, attempt_count, &e, reason).await?;
                    histogram!("mint_duration_seconds").record(started.elapsed().as_secs_f64());
                    return Ok(MintOutcome::Failed(e));
                }
            }
        }
    }

    async fn mint_once(
        &self,
        job_id: Uuid,
        request: &MintRequest,
        progress: &mut MintProgress,
    ) -> Result<String, ChainError> {
        let metadata_uri = match &progress.metadata_uri {
            Some(uri) => uri.clone(),
            None => {
                let uri = self.upload_metadata(request).await?;
                progress.metadata_uri = Some(uri.clone());
                self.checkpoint(job_id, progress).await;
                uri
            }
        };

        let mint = match &progress.mint_address {
            Some(mint) => mint.clone(),
            None => {
                let mint = self
                    .chain
                    .mint_nft(&metadata_uri, &request.title, &request.token_symbol)
                    .await?;
                debug!(mint = %mint, "NFT mint created");
                progress.mint_address = Some(mint.clone());
                self.checkpoint(job_id, progress).await;
                mint
            }
        };

        let account = match &progress.token_account {
            Some(account) => account.clone(),
            None => {
                let account = self
                    .chain
                    .create_associated_account(&mint, &request.destination_wallet)
                    .await?;
                progress.token_account = Some(account.clone());
                self.checkpoint(job_id, progress).await;
                account
            }
        };

        if progress.transfer_signature.is_none() {
            let signature = self.chain.transfer(&mint, &account, 1).await?;
            debug!(signature = %signature, destination = %account, "NFT transferred");
            progress.transfer_signature = Some(signature);
            self.checkpoint(job_id, progress).await;
        }
        Ok(mint)
    }

    /// 写回链上进度
    ///
    /// 写入失败不中断本次执行：内存中的进度仍可避免重复铸造，
    /// 最终状态写入会再按策略重试。
    async fn checkpoint(&self, job_id: Uuid, progress: &MintProgress) {
        if let Err(e) = self
            .persist("save_progress", || self.job_repo.save_progress(job_id, progress))
            .await
        {
            error!(error = %e, "Failed to persist mint progress");
        }
    }

    /// 按重试策略执行数据库写入
    async fn persist<F, Fut>(&self, step: &str, mut op: F) -> Result<(), RepositoryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), RepositoryError>>,
    {
        let mut retries: u32 = 0;
        loop {
            match op().await {
                Ok(()) => return Ok(()),
                Err(e) if self.policy.should_retry(retries) => {
                    retries += 1;
                    let backoff = self.policy.calculate_backoff(retries);
                    warn!(
                        step = step,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Mint state write failed, retrying"
                    );
                    sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 上传元数据；同一视频已上传过时复用地址
    async fn upload_metadata(&self, request: &MintRequest) -> Result<String, ChainError> {
        let key = format!("{}/{}.json", METADATA_PREFIX, request.video_id);
        let upload_failed = |e: StorageError| {
            ChainError::new(ChainErrorCode::Network, format!("metadata upload failed: {}", e))
        };

        if self.storage.exists(&key).await.map_err(upload_failed)? {
            return Ok(self.storage.public_url(&key));
        }

        let body = serde_json::to_vec(&request.metadata_json()).map_err(|e| {
            ChainError::new(ChainErrorCode::InvalidRequest, format!("invalid metadata: {}", e))
        })?;
        self.storage
            .put(&key, &body, "application/json")
            .await
            .map_err(upload_failed)
    }

    async fn fail(
        &self,
        job: &MintJob,
        attempt_count: i32,
        err: &ChainError,
        reason: String,
    ) -> Result<(), RepositoryError> {
        error!(
            attempts = attempt_count,
            reason = %reason,
            error = %err,
            "NFT mint failed permanently"
        );
        counter!("mint_failed_total", "reason" => reason).increment(1);

        self.job_repo
            .mark_failed(job.id, attempt_count, &err.message)
            .await?;
        self.video_repo.mark_failed(job.video_id).await?;

        if let Some(url) = &self.alert_url {
            let event = WebhookEvent::new(
                WebhookEventType::MintFailed,
                json!({
                    "event": WebhookEventType::MintFailed.to_string(),
                    "job_id": job.id,
                    "video_id": job.video_id,
                    "destination_wallet": job.request.destination_wallet,
                    "attempts": attempt_count,
                    "error": err.message,
                    "error_code": err.code.map(|c| c.to_string()),
                }),
                url.clone(),
                self.alert_max_retries,
            );
            if let Err(e) = self.webhook_repo.create(&event).await {
                error!("Failed to enqueue mint failure alert: {}", e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "mint_worker_test.rs"]
mod tests;
