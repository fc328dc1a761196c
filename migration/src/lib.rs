// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_raw_music;
mod m20260101_000002_create_raw_video;
mod m20260101_000003_create_tokens;
mod m20260101_000004_create_videos;
mod m20260101_000005_create_video_likes;
mod m20260101_000006_create_comments;
mod m20260101_000007_create_mint_jobs;
mod m20260101_000008_create_webhook_events;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_raw_music::Migration),
            Box::new(m20260101_000002_create_raw_video::Migration),
            Box::new(m20260101_000003_create_tokens::Migration),
            Box::new(m20260101_000004_create_videos::Migration),
            Box::new(m20260101_000005_create_video_likes::Migration),
            Box::new(m20260101_000006_create_comments::Migration),
            Box::new(m20260101_000007_create_mint_jobs::Migration),
            Box::new(m20260101_000008_create_webhook_events::Migration),
        ]
    }
}
