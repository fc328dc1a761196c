// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tunemint::application::use_cases::callback_use_case::CallbackUseCase;
use tunemint::application::use_cases::generation_use_case::GenerationUseCase;
use tunemint::application::use_cases::release_use_case::ReleaseUseCase;
use tunemint::application::use_cases::social_use_case::SocialUseCase;
use tunemint::config::settings::{ChainSettings, UpstreamSettings};
use tunemint::infrastructure::repositories::generation_repo_impl::{
    MusicTaskRepositoryImpl, VideoTaskRepositoryImpl,
};
use tunemint::infrastructure::repositories::mint_job_repo_impl::MintJobRepositoryImpl;
use tunemint::infrastructure::repositories::social_repo_impl::SocialRepositoryImpl;
use tunemint::infrastructure::repositories::token_repo_impl::TokenRepositoryImpl;
use tunemint::infrastructure::repositories::video_repo_impl::VideoRepositoryImpl;
use tunemint::infrastructure::repositories::webhook_event_repo_impl::WebhookEventRepoImpl;
use tunemint::infrastructure::services::chain_gateway_client::ChainGatewayClient;
use tunemint::infrastructure::services::indexer_client::NoopIndexer;
use tunemint::infrastructure::services::merge_service_impl::MergeServiceImpl;
use tunemint::infrastructure::services::music_service_impl::MusicServiceImpl;
use tunemint::infrastructure::services::upstream::UpstreamClient;
use tunemint::infrastructure::services::video_service_impl::VideoServiceImpl;
use tunemint::infrastructure::storage::InMemoryStorage;
use tunemint::presentation::middleware::callback_signature::CallbackAuth;
use tunemint::presentation::routes;
use tunemint::utils::retry_policy::RetryPolicy;
use tunemint::workers::mint_worker::MintWorker;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    /// 音乐/视频/合并服务与链上网关共用的模拟服务器
    pub upstream: MockServer,
    /// 不自动运行，测试中手动 `drain`
    pub mint_worker: MintWorker,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_secret(None).await
}

pub async fn create_test_app_with_secret(callback_secret: Option<&str>) -> TestApp {
    let upstream = MockServer::start().await;
    let db = setup_db().await;

    let music_repo = Arc::new(MusicTaskRepositoryImpl::new(db.clone()));
    let video_task_repo = Arc::new(VideoTaskRepositoryImpl::new(db.clone()));
    let video_repo = Arc::new(VideoRepositoryImpl::new(db.clone()));
    let mint_job_repo = Arc::new(MintJobRepositoryImpl::new(db.clone()));

    let timeout = Duration::from_secs(5);
    let upstream_settings = |prefix: &str| UpstreamSettings {
        base_url: format!("{}/{}", upstream.uri(), prefix),
        api_key: None,
    };
    let music_service = Arc::new(MusicServiceImpl::new(
        UpstreamClient::new("music", &upstream_settings("music"), timeout).unwrap(),
    ));
    let video_service = Arc::new(VideoServiceImpl::new(
        UpstreamClient::new("video", &upstream_settings("video"), timeout).unwrap(),
    ));
    let merge_service = Arc::new(MergeServiceImpl::new(
        UpstreamClient::new("merge", &upstream_settings("merge"), timeout).unwrap(),
    ));
    let chain = Arc::new(
        ChainGatewayClient::new(&ChainSettings {
            gateway_url: format!("{}/chain", upstream.uri()),
            authority_key: None,
            network: "devnet".to_string(),
            timeout_secs: 5,
        })
        .unwrap(),
    );

    let mint_notify = Arc::new(Notify::new());
    let generation_use_case = Arc::new(GenerationUseCase::new(
        music_repo.clone(),
        video_task_repo.clone(),
        music_service.clone(),
        video_service.clone(),
        merge_service,
        None,
    ));
    let callback_use_case = Arc::new(CallbackUseCase::new(
        music_repo,
        video_task_repo,
        music_service,
        video_service,
    ));
    let release_use_case = Arc::new(ReleaseUseCase::new(
        Arc::new(TokenRepositoryImpl::new(db.clone())),
        video_repo.clone(),
        mint_job_repo.clone(),
        Arc::new(NoopIndexer),
        mint_notify.clone(),
    ));
    let social_use_case = Arc::new(SocialUseCase::new(
        Arc::new(SocialRepositoryImpl::new(db.clone())),
        video_repo.clone(),
    ));

    let mint_worker = MintWorker::new(
        mint_job_repo,
        video_repo,
        Arc::new(WebhookEventRepoImpl::new(db.clone())),
        Arc::new(InMemoryStorage::new("https://cdn.test")),
        chain,
        mint_notify,
    )
    .with_policy(RetryPolicy {
        initial_backoff: Duration::from_millis(1),
        ..RetryPolicy::mint()
    });

    let app = routes::routes(CallbackAuth::new(callback_secret.map(str::to_string)))
        .layer(Extension(generation_use_case))
        .layer(Extension(callback_use_case))
        .layer(Extension(release_use_case))
        .layer(Extension(social_use_case));

    TestApp {
        server: TestServer::new(app).unwrap(),
        db,
        upstream,
        mint_worker,
    }
}

async fn setup_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

impl TestApp {
    /// 音乐服务受理请求并分配任务ID
    pub async fn mock_music_submit(&self, provider_task_id: &str) {
        Mock::given(method("POST"))
            .and(path("/music/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "task_id": provider_task_id })),
            )
            .mount(&self.upstream)
            .await;
    }

    /// 音乐服务状态查询一直返回处理中
    pub async fn mock_music_pending(&self) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/music/status/.+$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "processing" })),
            )
            .mount(&self.upstream)
            .await;
    }

    pub async fn mock_video_submit(&self, request_id: &str) {
        Mock::given(method("POST"))
            .and(path("/video/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "request_id": request_id })),
            )
            .mount(&self.upstream)
            .await;
    }

    pub async fn mock_video_pending(&self) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/video/status/.+$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "processing" })),
            )
            .mount(&self.upstream)
            .await;
    }

    pub async fn mock_merge(&self, s3_url: &str) {
        Mock::given(method("POST"))
            .and(path("/merge/merge"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "s3_url": s3_url })))
            .mount(&self.upstream)
            .await;
    }

    /// 链上网关三个步骤全部成功
    pub async fn mock_chain_success(&self, mint: &str) {
        Mock::given(method("POST"))
            .and(path("/chain/v1/nft/mint"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mint": mint })))
            .mount(&self.upstream)
            .await;
        Mock::given(method("POST"))
            .and(path("/chain/v1/token/associated-account"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "address": "ATA111" })),
            )
            .mount(&self.upstream)
            .await;
        Mock::given(method("POST"))
            .and(path("/chain/v1/token/transfer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "signature": "SIG111" })),
            )
            .mount(&self.upstream)
            .await;
    }
}
