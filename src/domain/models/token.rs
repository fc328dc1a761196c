// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 代币实体
///
/// 链上同质化代币元数据的本地镜像，以 `mint` 地址唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    /// 链上 mint 地址
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub creator: Option<String>,
    pub market_cap: f64,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Token {
    pub fn new(mint: String, name: String, symbol: String) -> Self {
        let now = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            mint,
            name,
            symbol,
            description: None,
            image_url: None,
            creator: None,
            market_cap: 0.0,
            twitter: None,
            telegram: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }
}
