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
                    .table(RawVideo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RawVideo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RawVideo::TaskId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RawVideo::VideoTaskId).string())
                    .col(ColumnDef::new(RawVideo::UserAddress).string())
                    .col(ColumnDef::new(RawVideo::Prompt).text().not_null())
                    .col(ColumnDef::new(RawVideo::Style).string())
                    .col(ColumnDef::new(RawVideo::VideoUrl).text())
                    .col(ColumnDef::new(RawVideo::MergedVideoUrl).text())
                    .col(
                        ColumnDef::new(RawVideo::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RawVideo::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RawVideo::ErrorMessage).text())
                    .col(
                        ColumnDef::new(RawVideo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RawVideo::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raw_video_video_task_id")
                    .table(RawVideo::Table)
                    .col(RawVideo::VideoTaskId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RawVideo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RawVideo {
    Table,
    Id,
    TaskId,
    VideoTaskId,
    UserAddress,
    Prompt,
    Style,
    VideoUrl,
    MergedVideoUrl,
    Status,
    IsCompleted,
    ErrorMessage,
    CreatedAt,
    UpdatedAt,
}
