// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::token::Token;
use async_trait::async_trait;
use uuid::Uuid;

/// 代币仓库特质
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// 按 `mint` upsert：不存在则插入，存在则只更新市值
    async fn upsert_by_mint(&self, token: &Token) -> Result<Token, RepositoryError>;
    async fn find_by_mint(&self, mint: &str) -> Result<Option<Token>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, RepositoryError>;
}
