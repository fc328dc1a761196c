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
                    .table(MintJobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MintJobs::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(MintJobs::VideoId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MintJobs::Payload).json().not_null())
                    .col(
                        ColumnDef::new(MintJobs::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(MintJobs::AttemptCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(MintJobs::LastError).text())
                    .col(ColumnDef::new(MintJobs::LockedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(MintJobs::MetadataUri).text())
                    .col(ColumnDef::new(MintJobs::MintAddress).string())
                    .col(ColumnDef::new(MintJobs::TokenAccount).string())
                    .col(ColumnDef::new(MintJobs::TransferSignature).string())
                    .col(
                        ColumnDef::new(MintJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MintJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(MintJobs::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mint_jobs_video_id")
                            .from(MintJobs::Table, MintJobs::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mint_jobs_status_created")
                    .table(MintJobs::Table)
                    .col(MintJobs::Status)
                    .col(MintJobs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MintJobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MintJobs {
    Table,
    Id,
    VideoId,
    Payload,
    Status,
    AttemptCount,
    LastError,
    LockedAt,
    MetadataUri,
    MintAddress,
    TokenAccount,
    TransferSignature,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
}
