// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器管理器测试
///
/// 通过管理器启动真实的过期工作器，验证后台循环会处理超时任务
#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;
    use std::time::Duration;
    use tunemint::domain::models::generation::{GenerationStatus, GenerationTask};
    use tunemint::domain::repositories::generation_repository::MusicTaskRepository;
    use tunemint::infrastructure::repositories::generation_repo_impl::{
        MusicTaskRepositoryImpl, VideoTaskRepositoryImpl,
    };
    use tunemint::workers::expiration_worker::GenerationExpirationWorker;
    use tunemint::workers::WorkerManager;

    #[tokio::test]
    async fn test_spawned_expiration_worker_fails_stale_tasks() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let db = Arc::new(db);

        let music_repo = Arc::new(MusicTaskRepositoryImpl::new(db.clone()));
        music_repo
            .create_if_absent(&GenerationTask::new(
                "t1".to_string(),
                "sunset".to_string(),
                None,
                None,
                Some("m1".to_string()),
            ))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut manager = WorkerManager::new();
        manager.spawn_expiration_worker(GenerationExpirationWorker::new(
            music_repo.clone(),
            Arc::new(VideoTaskRepositoryImpl::new(db.clone())),
            chrono::Duration::zero(),
            Duration::from_millis(10),
        ));
        assert_eq!(manager.len(), 1);

        let mut status = GenerationStatus::Pending;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            status = music_repo.find_by_task_id("t1").await.unwrap().unwrap().status;
            if status == GenerationStatus::Failed {
                break;
            }
        }
        assert_eq!(status, GenerationStatus::Failed);

        manager.shutdown();
        assert!(manager.is_empty());
    }
}
