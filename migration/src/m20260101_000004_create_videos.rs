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
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Videos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Videos::TokenId).uuid().not_null())
                    .col(ColumnDef::new(Videos::TaskId).string().unique_key())
                    .col(ColumnDef::new(Videos::Title).string().not_null())
                    .col(ColumnDef::new(Videos::Description).text())
                    .col(ColumnDef::new(Videos::Url).text().not_null())
                    .col(ColumnDef::new(Videos::ThumbnailUrl).text())
                    .col(ColumnDef::new(Videos::Duration).integer())
                    .col(
                        ColumnDef::new(Videos::Status)
                            .string()
                            .not_null()
                            .default("processing"),
                    )
                    .col(ColumnDef::new(Videos::NftAddress).string())
                    .col(ColumnDef::new(Videos::Creator).string())
                    .col(
                        ColumnDef::new(Videos::PlayCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Videos::LikeCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Videos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Videos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_videos_token_id")
                            .from(Videos::Table, Videos::TokenId)
                            .to(Tokens::Table, Tokens::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_videos_creator")
                    .table(Videos::Table)
                    .col(Videos::Creator)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    TokenId,
    TaskId,
    Title,
    Description,
    Url,
    ThumbnailUrl,
    Duration,
    Status,
    NftAddress,
    Creator,
    PlayCount,
    LikeCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tokens {
    Table,
    Id,
}
