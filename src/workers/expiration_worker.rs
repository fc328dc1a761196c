// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::generation::Stage;
use crate::domain::repositories::generation_repository::{
    MusicTaskRepository, VideoTaskRepository,
};
use crate::domain::repositories::RepositoryError;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 生成任务超时工作器
///
/// 定期把超过超时时间仍为 pending 的音乐/视频任务标记为失败，
/// 避免调用方无限轮询。
pub struct GenerationExpirationWorker {
    music_repo: Arc<dyn MusicTaskRepository>,
    video_repo: Arc<dyn VideoTaskRepository>,
    timeout: chrono::Duration,
    interval: Duration,
}

impl GenerationExpirationWorker {
    pub fn new(
        music_repo: Arc<dyn MusicTaskRepository>,
        video_repo: Arc<dyn VideoTaskRepository>,
        timeout: chrono::Duration,
        interval: Duration,
    ) -> Self {
        Self {
            music_repo,
            video_repo,
            timeout,
            interval,
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Generation expiration worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.expire_stale_tasks().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Expired {} stale generation tasks", count);
                    }
                }
                Err(e) => {
                    error!("Failed to expire generation tasks: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn expire_stale_tasks(&self) -> Result<u64, RepositoryError> {
        let cutoff = Utc::now() - self.timeout;

        let music = self.music_repo.expire_pending(cutoff).await?;
        let video = self.video_repo.expire_pending(cutoff).await?;

        if music > 0 {
            counter!("generation_expired_total", "stage" => Stage::Music.to_string())
                .increment(music);
        }
        if video > 0 {
            counter!("generation_expired_total", "stage" => Stage::Video.to_string())
                .increment(video);
        }

        Ok(music + video)
    }
}

#[cfg(test)]
#[path = "expiration_worker_test.rs"]
mod tests;
