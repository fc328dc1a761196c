// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::Token;
use crate::domain::repositories::token_repository::TokenRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::token;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 代币仓库实现
#[derive(Clone)]
pub struct TokenRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TokenRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<token::Model> for Token {
    fn from(model: token::Model) -> Self {
        Self {
            id: model.id,
            mint: model.mint,
            name: model.name,
            symbol: model.symbol,
            description: model.description,
            image_url: model.image_url,
            creator: model.creator,
            market_cap: model.market_cap,
            twitter: model.twitter,
            telegram: model.telegram,
            website: model.website,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Token> for token::ActiveModel {
    fn from(token: &Token) -> Self {
        Self {
            id: Set(token.id),
            mint: Set(token.mint.clone()),
            name: Set(token.name.clone()),
            symbol: Set(token.symbol.clone()),
            description: Set(token.description.clone()),
            image_url: Set(token.image_url.clone()),
            creator: Set(token.creator.clone()),
            market_cap: Set(token.market_cap),
            twitter: Set(token.twitter.clone()),
            telegram: Set(token.telegram.clone()),
            website: Set(token.website.clone()),
            created_at: Set(token.created_at),
            updated_at: Set(token.updated_at),
        }
    }
}

#[async_trait]
impl TokenRepository for TokenRepositoryImpl {
    async fn upsert_by_mint(&self, token: &Token) -> Result<Token, RepositoryError> {
        let active: token::ActiveModel = token.into();

        // 冲突时只更新可变字段，id 和创建信息保持首次写入的值
        token::Entity::insert(active)
            .on_conflict(
                OnConflict::column(token::Column::Mint)
                    .update_columns([token::Column::MarketCap, token::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        self.find_by_mint(&token.mint)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_mint(&self, mint: &str) -> Result<Option<Token>, RepositoryError> {
        let model = token::Entity::find()
            .filter(token::Column::Mint.eq(mint))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, RepositoryError> {
        let model = token::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }
}
