// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tunemint::application::use_cases::callback_use_case::CallbackUseCase;
use tunemint::application::use_cases::generation_use_case::GenerationUseCase;
use tunemint::application::use_cases::release_use_case::ReleaseUseCase;
use tunemint::application::use_cases::social_use_case::SocialUseCase;
use tunemint::config::settings::Settings;
use tunemint::domain::services::indexer::AssetIndexer;
use tunemint::infrastructure::database::connection;
use tunemint::infrastructure::metrics::init_metrics;
use tunemint::infrastructure::repositories::generation_repo_impl::{
    MusicTaskRepositoryImpl, VideoTaskRepositoryImpl,
};
use tunemint::infrastructure::repositories::mint_job_repo_impl::MintJobRepositoryImpl;
use tunemint::infrastructure::repositories::social_repo_impl::SocialRepositoryImpl;
use tunemint::infrastructure::repositories::token_repo_impl::TokenRepositoryImpl;
use tunemint::infrastructure::repositories::video_repo_impl::VideoRepositoryImpl;
use tunemint::infrastructure::repositories::webhook_event_repo_impl::WebhookEventRepoImpl;
use tunemint::infrastructure::services::chain_gateway_client::ChainGatewayClient;
use tunemint::infrastructure::services::indexer_client::{IndexerClient, NoopIndexer};
use tunemint::infrastructure::services::merge_service_impl::MergeServiceImpl;
use tunemint::infrastructure::services::music_service_impl::MusicServiceImpl;
use tunemint::infrastructure::services::upstream::UpstreamClient;
use tunemint::infrastructure::services::video_service_impl::VideoServiceImpl;
use tunemint::infrastructure::services::webhook_service_impl::WebhookServiceImpl;
use tunemint::infrastructure::storage::create_storage_repository;
use tunemint::presentation::middleware::callback_signature::CallbackAuth;
use tunemint::presentation::routes;
use tunemint::utils::retry_policy::RetryPolicy;
use tunemint::utils::telemetry;
use tunemint::workers::expiration_worker::GenerationExpirationWorker;
use tunemint::workers::mint_worker::MintWorker;
use tunemint::workers::webhook_worker::WebhookWorker;
use tunemint::workers::WorkerManager;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting tunemint...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    init_metrics(settings.metrics.listen_addr.as_deref());

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Repositories
    let music_repo = Arc::new(MusicTaskRepositoryImpl::new(db.clone()));
    let video_task_repo = Arc::new(VideoTaskRepositoryImpl::new(db.clone()));
    let token_repo = Arc::new(TokenRepositoryImpl::new(db.clone()));
    let video_repo = Arc::new(VideoRepositoryImpl::new(db.clone()));
    let social_repo = Arc::new(SocialRepositoryImpl::new(db.clone()));
    let mint_job_repo = Arc::new(MintJobRepositoryImpl::new(db.clone()));
    let webhook_event_repo = Arc::new(WebhookEventRepoImpl::new(db.clone()));
    let storage = create_storage_repository(&settings.storage).await?;

    // 5. Upstream clients
    let services = &settings.services;
    let request_timeout = Duration::from_secs(services.request_timeout_secs);
    let music_service = Arc::new(MusicServiceImpl::new(UpstreamClient::new(
        "music",
        &services.music,
        request_timeout,
    )?));
    let video_service = Arc::new(VideoServiceImpl::new(UpstreamClient::new(
        "video",
        &services.video,
        request_timeout,
    )?));
    let merge_service = Arc::new(MergeServiceImpl::new(UpstreamClient::new(
        "merge",
        &services.merge,
        Duration::from_secs(services.merge_timeout_secs),
    )?));

    let indexer: Arc<dyn AssetIndexer> = match settings.indexer.rpc_url.clone() {
        Some(rpc_url) => Arc::new(IndexerClient::new(
            rpc_url,
            Duration::from_secs(settings.indexer.timeout_secs),
        )?),
        None => {
            warn!("Indexer RPC URL not configured, token metadata will use placeholders");
            Arc::new(NoopIndexer)
        }
    };
    let chain = Arc::new(ChainGatewayClient::new(&settings.chain)?);

    // 6. Use cases
    let mint_notify = Arc::new(Notify::new());
    let generation_use_case = Arc::new(GenerationUseCase::new(
        music_repo.clone(),
        video_task_repo.clone(),
        music_service.clone(),
        video_service.clone(),
        merge_service,
        settings.pipeline.callback_base_url.clone(),
    ));
    let callback_use_case = Arc::new(CallbackUseCase::new(
        music_repo.clone(),
        video_task_repo.clone(),
        music_service,
        video_service,
    ));
    let release_use_case = Arc::new(ReleaseUseCase::new(
        token_repo,
        video_repo.clone(),
        mint_job_repo.clone(),
        indexer,
        mint_notify.clone(),
    ));
    let social_use_case = Arc::new(SocialUseCase::new(social_repo, video_repo.clone()));

    // 7. Start workers
    let mut worker_manager = WorkerManager::new();
    worker_manager.spawn_mint_worker(
        MintWorker::new(
            mint_job_repo,
            video_repo,
            webhook_event_repo.clone(),
            storage,
            chain,
            mint_notify,
        )
        .with_policy(RetryPolicy::from_minting_settings(&settings.minting))
        .with_intervals(
            Duration::from_secs(settings.minting.poll_interval_secs),
            Duration::from_secs(settings.minting.lock_timeout_secs),
        )
        .with_alerts(
            settings.alerts.webhook_url.clone(),
            settings.alerts.max_retries,
        ),
    );
    worker_manager.spawn_expiration_worker(GenerationExpirationWorker::new(
        music_repo,
        video_task_repo,
        chrono::Duration::seconds(settings.pipeline.generation_timeout_secs as i64),
        Duration::from_secs(settings.pipeline.expiration_interval_secs),
    ));
    worker_manager.spawn_webhook_worker(WebhookWorker::new(
        webhook_event_repo,
        Arc::new(WebhookServiceImpl::new(settings.alerts.secret.clone())),
    ));
    info!("Started {} background workers", worker_manager.len());

    // 8. Start HTTP server
    let app = routes::routes(CallbackAuth::new(settings.pipeline.callback_secret.clone()))
        .layer(Extension(generation_use_case))
        .layer(Extension(callback_use_case))
        .layer(Extension(release_use_case))
        .layer(Extension(social_use_case))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            worker_manager.wait_for_shutdown().await;
        })
        .await?;

    Ok(())
}
