// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoLikes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoLikes::UserId).string().not_null())
                    .col(ColumnDef::new(VideoLikes::VideoId).uuid().not_null())
                    .col(
                        ColumnDef::new(VideoLikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_likes_video_id")
                            .from(VideoLikes::Table, VideoLikes::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (user_id, video_id) 唯一约束
        manager
            .create_index(
                Index::create()
                    .name("idx_video_likes_user_video")
                    .table(VideoLikes::Table)
                    .col(VideoLikes::UserId)
                    .col(VideoLikes::VideoId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoLikes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VideoLikes {
    Table,
    Id,
    UserId,
    VideoId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
}
