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
                    .table(Tokens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tokens::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tokens::Mint).string().not_null().unique_key())
                    .col(ColumnDef::new(Tokens::Name).string().not_null())
                    .col(ColumnDef::new(Tokens::Symbol).string().not_null())
                    .col(ColumnDef::new(Tokens::Description).text())
                    .col(ColumnDef::new(Tokens::ImageUrl).text())
                    .col(ColumnDef::new(Tokens::Creator).string())
                    .col(
                        ColumnDef::new(Tokens::MarketCap)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Tokens::Twitter).string())
                    .col(ColumnDef::new(Tokens::Telegram).string())
                    .col(ColumnDef::new(Tokens::Website).string())
                    .col(
                        ColumnDef::new(Tokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tokens::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tokens {
    Table,
    Id,
    Mint,
    Name,
    Symbol,
    Description,
    ImageUrl,
    Creator,
    MarketCap,
    Twitter,
    Telegram,
    Website,
    CreatedAt,
    UpdatedAt,
}
