// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Indexer request failed: {0}")]
    Request(String),
}

/// 链上索引服务返回的代币元数据，所有字段均可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub creator: Option<String>,
    pub market_cap: Option<f64>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
}

/// 链上索引服务
#[async_trait]
pub trait AssetIndexer: Send + Sync {
    /// 查询资产元数据，未收录时返回 `Ok(None)`
    async fn get_asset(&self, mint: &str) -> Result<Option<AssetMetadata>, IndexerError>;
}
