// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::infrastructure::repositories::generation_repo_impl::{
    MusicTaskRepositoryImpl, VideoTaskRepositoryImpl,
};
use crate::infrastructure::database::entities::raw_music;
use crate::test_support::{setup_db, FakeMerge, FakeMusic, FakeVideo};
use sea_orm::{EntityTrait, PaginatorTrait};

struct Fixture {
    use_case: GenerationUseCase,
    music: Arc<FakeMusic>,
    merge: Arc<FakeMerge>,
    music_repo: Arc<MusicTaskRepositoryImpl>,
    video_repo: Arc<VideoTaskRepositoryImpl>,
    db: Arc<sea_orm::DatabaseConnection>,
}

async fn fixture(music: FakeMusic) -> Fixture {
    let db = setup_db().await;
    let music = Arc::new(music);
    let merge = Arc::new(FakeMerge::new("merged.mp4"));
    let music_repo = Arc::new(MusicTaskRepositoryImpl::new(db.clone()));
    let video_repo = Arc::new(VideoTaskRepositoryImpl::new(db.clone()));
    let use_case = GenerationUseCase::new(
        music_repo.clone(),
        video_repo.clone(),
        music.clone(),
        Arc::new(FakeVideo::deferred("v1")),
        merge.clone(),
        None,
    );
    Fixture {
        use_case,
        music,
        merge,
        music_repo,
        video_repo,
        db,
    }
}

fn music_dto(task_id: &str) -> MusicGenerationRequestDto {
    MusicGenerationRequestDto {
        prompt: "sunset".to_string(),
        genre: Some("pop".to_string()),
        task_id: Some(task_id.to_string()),
        wallet_address: Some("wallet1".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_duplicate_music_submission_is_idempotent() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    let first = fx.use_case.submit_music(music_dto("t1")).await.unwrap();
    let second = fx.use_case.submit_music(music_dto("t1")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.music_task_id.as_deref(), Some("m1"));
    assert!(!second.is_completed);
    assert_eq!(fx.music.submissions(), 1);

    let rows = raw_music::Entity::find().count(fx.db.as_ref()).await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_missing_task_id_is_allocated() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    let mut dto = music_dto("");
    dto.task_id = None;
    let task = fx.use_case.submit_music(dto).await.unwrap();

    assert!(task.task_id.starts_with("task_"));
}

#[tokio::test]
async fn test_upstream_failure_persists_nothing() {
    let fx = fixture(FakeMusic::failing(502, "bad gateway")).await;

    let err = fx.use_case.submit_music(music_dto("t1")).await.unwrap_err();
    assert!(matches!(err, PipelineError::GenerationRequestFailed(_)));

    assert!(fx.music_repo.find_by_task_id("t1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_prompt_is_validation_error() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    let mut dto = music_dto("t1");
    dto.prompt = String::new();
    let err = fx.use_case.submit_music(dto).await.unwrap_err();

    assert!(matches!(err, PipelineError::ValidationError(_)));
    assert_eq!(fx.music.submissions(), 0);
}

#[tokio::test]
async fn test_whitespace_fields_are_validation_errors() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    let mut dto = music_dto("t1");
    dto.prompt = "   ".to_string();
    let err = fx.use_case.submit_music(dto).await.unwrap_err();
    assert!(matches!(err, PipelineError::ValidationError(_)));
    assert_eq!(fx.music.submissions(), 0);

    let err = fx
        .use_case
        .submit_video(VideoGenerationRequestDto {
            prompt: "\t\n".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::ValidationError(_)));

    let err = fx
        .use_case
        .merge(MergeRequestDto {
            task_id: "  ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::ValidationError(ref m) if m.contains("task_id")));
    assert_eq!(fx.merge.calls(), 0);
}

#[tokio::test]
async fn test_merge_without_music_is_missing_dependency() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    fx.use_case
        .submit_video(VideoGenerationRequestDto {
            prompt: "waves".to_string(),
            task_id: Some("t1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    fx.video_repo
        .patch_by_task_id("t1", &GenerationPatch::video_ready("v.mp4".to_string()))
        .await
        .unwrap();

    let err = fx
        .use_case
        .merge(MergeRequestDto {
            task_id: "t1".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::MissingDependency(_)));
    assert_eq!(fx.merge.calls(), 0);
    let video = fx.video_repo.find_by_task_id("t1").await.unwrap().unwrap();
    assert!(video.merged_video_url.is_none());
}

#[tokio::test]
async fn test_merge_persists_and_short_circuits() {
    let fx = fixture(FakeMusic::deferred("m1")).await;

    fx.use_case.submit_music(music_dto("t1")).await.unwrap();
    fx.music_repo
        .patch_by_task_id(
            "t1",
            &GenerationPatch::music_ready("a.mp3".to_string(), Some("i.png".to_string())),
        )
        .await
        .unwrap();
    fx.use_case
        .submit_video(VideoGenerationRequestDto {
            prompt: "waves".to_string(),
            task_id: Some("t1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    fx.video_repo
        .patch_by_task_id("t1", &GenerationPatch::video_ready("v.mp4".to_string()))
        .await
        .unwrap();

    let dto = MergeRequestDto {
        task_id: "t1".to_string(),
    };
    let first = fx.use_case.merge(dto.clone()).await.unwrap();
    let second = fx.use_case.merge(dto).await.unwrap();

    assert_eq!(first.s3_url, "merged.mp4");
    assert_eq!(second, first);
    assert_eq!(fx.merge.calls(), 1);

    let video = fx.video_repo.find_by_task_id("t1").await.unwrap().unwrap();
    assert!(video.is_completed);
    assert_eq!(video.status, GenerationStatus::Completed);
}
