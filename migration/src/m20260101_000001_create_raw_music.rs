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
                    .table(RawMusic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RawMusic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RawMusic::TaskId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RawMusic::MusicTaskId).string())
                    .col(ColumnDef::new(RawMusic::UserAddress).string())
                    .col(ColumnDef::new(RawMusic::Prompt).text().not_null())
                    .col(ColumnDef::new(RawMusic::Genre).string())
                    .col(ColumnDef::new(RawMusic::AudioUrl).text())
                    .col(ColumnDef::new(RawMusic::ImageUrl).text())
                    .col(
                        ColumnDef::new(RawMusic::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(RawMusic::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RawMusic::ErrorMessage).text())
                    .col(
                        ColumnDef::new(RawMusic::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RawMusic::UpdatedAt)
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
                    .name("idx_raw_music_music_task_id")
                    .table(RawMusic::Table)
                    .col(RawMusic::MusicTaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raw_music_status_created")
                    .table(RawMusic::Table)
                    .col(RawMusic::Status)
                    .col(RawMusic::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RawMusic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RawMusic {
    Table,
    Id,
    TaskId,
    MusicTaskId,
    UserAddress,
    Prompt,
    Genre,
    AudioUrl,
    ImageUrl,
    Status,
    IsCompleted,
    ErrorMessage,
    CreatedAt,
    UpdatedAt,
}
