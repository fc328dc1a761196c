// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::indexer::{AssetIndexer, AssetMetadata, IndexerError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Asset>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct Asset {
    #[serde(default)]
    content: AssetContent,
    #[serde(default)]
    authorities: Vec<Authority>,
    token_info: Option<TokenInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetContent {
    #[serde(default)]
    metadata: ContentMetadata,
    #[serde(default)]
    links: ContentLinks,
}

#[derive(Debug, Default, Deserialize)]
struct ContentMetadata {
    name: Option<String>,
    symbol: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentLinks {
    image: Option<String>,
    external_url: Option<String>,
    twitter: Option<String>,
    telegram: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Authority {
    address: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    price_info: Option<PriceInfo>,
}

#[derive(Debug, Deserialize)]
struct PriceInfo {
    total_price: Option<f64>,
}

impl From<Asset> for AssetMetadata {
    fn from(asset: Asset) -> Self {
        Self {
            name: asset.content.metadata.name,
            symbol: asset.content.metadata.symbol,
            description: asset.content.metadata.description,
            image_url: asset.content.links.image,
            creator: asset.authorities.into_iter().next().map(|a| a.address),
            market_cap: asset
                .token_info
                .and_then(|t| t.price_info)
                .and_then(|p| p.total_price),
            twitter: asset.content.links.twitter,
            telegram: asset.content.links.telegram,
            website: asset.content.links.external_url,
        }
    }
}

/// 链上索引服务客户端（DAS `getAsset`）
pub struct IndexerClient {
    client: reqwest::Client,
    rpc_url: String,
}

impl IndexerClient {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self, IndexerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexerError::Request(e.to_string()))?;
        Ok(Self { client, rpc_url })
    }
}

#[async_trait]
impl AssetIndexer for IndexerClient {
    async fn get_asset(&self, mint: &str) -> Result<Option<AssetMetadata>, IndexerError> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": "tunemint",
                "method": "getAsset",
                "params": { "id": mint }
            }))
            .send()
            .await
            .map_err(|e| IndexerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IndexerError::Request(format!(
                "indexer returned status {}",
                response.status()
            )));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| IndexerError::Request(e.to_string()))?;

        if let Some(error) = body.error {
            // 资产不存在不算失败
            if error.message.to_lowercase().contains("not found") {
                return Ok(None);
            }
            return Err(IndexerError::Request(error.message));
        }

        Ok(body.result.map(Into::into))
    }
}

/// 未配置索引服务时使用，始终返回无元数据
pub struct NoopIndexer;

#[async_trait]
impl AssetIndexer for NoopIndexer {
    async fn get_asset(&self, _mint: &str) -> Result<Option<AssetMetadata>, IndexerError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_asset_maps_das_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "getAsset", "params": { "id": "MINT123" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "tunemint",
                "result": {
                    "content": {
                        "metadata": { "name": "Sunset Coin", "symbol": "SUN" },
                        "links": { "image": "https://img/sun.png" }
                    },
                    "authorities": [ { "address": "Creator111" } ],
                    "token_info": { "price_info": { "total_price": 4200.5 } }
                }
            })))
            .mount(&server)
            .await;

        let client = IndexerClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let asset = client.get_asset("MINT123").await.unwrap().unwrap();

        assert_eq!(asset.name.as_deref(), Some("Sunset Coin"));
        assert_eq!(asset.symbol.as_deref(), Some("SUN"));
        assert_eq!(asset.image_url.as_deref(), Some("https://img/sun.png"));
        assert_eq!(asset.creator.as_deref(), Some("Creator111"));
        assert_eq!(asset.market_cap, Some(4200.5));
        assert_eq!(asset.description, None);
    }

    #[tokio::test]
    async fn test_asset_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "tunemint",
                "error": { "code": -32000, "message": "Asset Not Found" }
            })))
            .mount(&server)
            .await;

        let client = IndexerClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(client.get_asset("MISSING").await.unwrap().is_none());
    }
}
