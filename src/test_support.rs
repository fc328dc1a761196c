// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 单元测试共用的数据库与上游服务替身

use crate::domain::models::token::Token;
use crate::domain::models::video::Video;
use crate::domain::repositories::token_repository::TokenRepository;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::services::generation::{
    GenerationError, MergeRequest, MergeService, MusicGenerator, MusicRequest, MusicResult,
    ProviderStatus, Submission, VideoGenerator, VideoRequest, VideoResult,
};
use crate::infrastructure::repositories::token_repo_impl::TokenRepositoryImpl;
use crate::infrastructure::repositories::video_repo_impl::VideoRepositoryImpl;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 已迁移的内存 SQLite
///
/// 内存库每个连接各自独立，连接池固定为 1
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to open sqlite");
    Migrator::up(&db, None).await.expect("failed to migrate");
    Arc::new(db)
}

/// 写入一个代币及其下的视频
pub async fn seed_video(db: &Arc<DatabaseConnection>, mint: &str, creator: &str) -> Video {
    let token = TokenRepositoryImpl::new(db.clone())
        .upsert_by_mint(&Token::new(mint.to_string(), "Coin".to_string(), "CN".to_string()))
        .await
        .expect("failed to seed token");

    let mut video = Video::new(token.id, format!("{} video", creator), "v.mp4".to_string());
    video.creator = Some(creator.to_string());
    VideoRepositoryImpl::new(db.clone())
        .create_with_mint_job(&video, None)
        .await
        .expect("failed to seed video")
        .into_inner()
}

/// 音乐服务替身
pub struct FakeMusic {
    pub submissions: AtomicUsize,
    pub submit_result: Mutex<Result<Submission<MusicResult>, GenerationError>>,
    pub query_result: Mutex<ProviderStatus<MusicResult>>,
}

impl FakeMusic {
    pub fn deferred(provider_task_id: &str) -> Self {
        Self {
            submissions: AtomicUsize::new(0),
            submit_result: Mutex::new(Ok(Submission {
                provider_task_id: Some(provider_task_id.to_string()),
                result: None,
            })),
            query_result: Mutex::new(ProviderStatus::Pending),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        let fake = Self::deferred("unused");
        *fake.submit_result.lock().unwrap() =
            Err(GenerationError::request_failed("music", Some(status), body));
        fake
    }

    pub fn set_query(&self, status: ProviderStatus<MusicResult>) {
        *self.query_result.lock().unwrap() = status;
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MusicGenerator for FakeMusic {
    async fn submit(
        &self,
        _request: &MusicRequest,
    ) -> Result<Submission<MusicResult>, GenerationError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.submit_result.lock().unwrap().clone()
    }

    async fn query(
        &self,
        _provider_task_id: &str,
    ) -> Result<ProviderStatus<MusicResult>, GenerationError> {
        Ok(self.query_result.lock().unwrap().clone())
    }
}

/// 视频服务替身
pub struct FakeVideo {
    pub submissions: AtomicUsize,
    pub provider_task_id: String,
    pub query_result: Mutex<ProviderStatus<VideoResult>>,
}

impl FakeVideo {
    pub fn deferred(provider_task_id: &str) -> Self {
        Self {
            submissions: AtomicUsize::new(0),
            provider_task_id: provider_task_id.to_string(),
            query_result: Mutex::new(ProviderStatus::Pending),
        }
    }

    pub fn set_query(&self, status: ProviderStatus<VideoResult>) {
        *self.query_result.lock().unwrap() = status;
    }
}

#[async_trait]
impl VideoGenerator for FakeVideo {
    async fn submit(
        &self,
        _request: &VideoRequest,
    ) -> Result<Submission<VideoResult>, GenerationError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        Ok(Submission {
            provider_task_id: Some(self.provider_task_id.clone()),
            result: None,
        })
    }

    async fn query(
        &self,
        _provider_task_id: &str,
    ) -> Result<ProviderStatus<VideoResult>, GenerationError> {
        Ok(self.query_result.lock().unwrap().clone())
    }
}

/// 合并服务替身
pub struct FakeMerge {
    pub calls: AtomicUsize,
    pub url: String,
}

impl FakeMerge {
    pub fn new(url: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            url: url.to_string(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MergeService for FakeMerge {
    async fn merge(&self, _request: &MergeRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.url.clone())
    }
}
