// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ChainSettings;
use crate::domain::services::chain::{ChainError, ChainErrorCode, ChainProgram};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GatewayError,
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    code: Option<ChainErrorCode>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct MintResponse {
    mint: String,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    address: String,
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
    signature: String,
}

/// 链上签名网关客户端
///
/// 网关持有铸造权限私钥，负责签名并提交 mint / 关联账户 / 转账交易。
/// 错误响应体 `{"error": {"code": "...", "message": "..."}}` 映射为结构化的 `ChainError`。
pub struct ChainGatewayClient {
    client: reqwest::Client,
    base_url: Url,
    authority_key: Option<String>,
    network: String,
}

impl ChainGatewayClient {
    pub fn new(settings: &ChainSettings) -> Result<Self, ChainError> {
        let mut base = settings.gateway_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            ChainError::new(ChainErrorCode::InvalidRequest, format!("invalid gateway url: {}", e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ChainError::unclassified(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            authority_key: settings.authority_key.clone(),
            network: settings.network.clone(),
        })
    }

    async fn call<B, T>(&self, path: &str, body: &B) -> Result<T, ChainError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ChainError::new(ChainErrorCode::InvalidRequest, e.to_string()))?;

        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.authority_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => ChainError {
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                Err(_) => ChainError::unclassified(format!("gateway status {}: {}", status, text)),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            ChainError::unclassified(format!("malformed gateway response ({}): {}", e, text))
        })
    }
}

fn transport_error(err: reqwest::Error) -> ChainError {
    if err.is_timeout() {
        ChainError::new(ChainErrorCode::Timeout, err.to_string())
    } else if err.is_connect() || err.is_request() {
        ChainError::new(ChainErrorCode::Network, err.to_string())
    } else {
        ChainError::unclassified(err.to_string())
    }
}

#[async_trait]
impl ChainProgram for ChainGatewayClient {
    async fn mint_nft(
        &self,
        metadata_uri: &str,
        name: &str,
        symbol: &str,
    ) -> Result<String, ChainError> {
        let response: MintResponse = self
            .call(
                "v1/nft/mint",
                &json!({
                    "network": self.network,
                    "metadata_uri": metadata_uri,
                    "name": name,
                    "symbol": symbol,
                }),
            )
            .await?;
        Ok(response.mint)
    }

    async fn create_associated_account(
        &self,
        mint: &str,
        owner: &str,
    ) -> Result<String, ChainError> {
        let response: AccountResponse = self
            .call(
                "v1/token/associated-account",
                &json!({ "network": self.network, "mint": mint, "owner": owner }),
            )
            .await?;
        Ok(response.address)
    }

    async fn transfer(
        &self,
        mint: &str,
        destination_account: &str,
        amount: u64,
    ) -> Result<String, ChainError> {
        let response: TransferResponse = self
            .call(
                "v1/token/transfer",
                &json!({
                    "network": self.network,
                    "mint": mint,
                    "destination": destination_account,
                    "amount": amount,
                }),
            )
            .await?;
        Ok(response.signature)
    }
}
