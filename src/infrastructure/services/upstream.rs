// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::UpstreamSettings;
use crate::domain::services::generation::GenerationError;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// 上游生成服务的 HTTP 客户端
///
/// 非 2xx、负载无法解析与传输错误统一映射为 `GenerationError::RequestFailed`，
/// 客户端本身不做重试。
#[derive(Clone)]
pub struct UpstreamClient {
    service: &'static str,
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(
        service: &'static str,
        settings: &UpstreamSettings,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        // 以 / 结尾才能让 join 保留基础路径
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            GenerationError::request_failed(service, None, format!("invalid base url: {}", e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::request_failed(service, None, e.to_string()))?;

        Ok(Self {
            service,
            client,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GenerationError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| self.failed(None, format!("invalid endpoint {}: {}", path, e)))
    }

    /// 构造本服务的失败错误
    pub fn failed(&self, status: Option<u16>, body: impl Into<String>) -> GenerationError {
        GenerationError::request_failed(self.service, status, body)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GenerationError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .request(Method::POST, self.endpoint(path)?)
            .json(body);
        self.send(request).await
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, GenerationError>
    where
        T: DeserializeOwned,
    {
        let request = self.client.request(Method::GET, self.endpoint(path)?);
        self.send(request).await
    }

    async fn send<T>(&self, mut request: reqwest::RequestBuilder) -> Result<T, GenerationError>
    where
        T: DeserializeOwned,
    {
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.failed(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.failed(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            return Err(self.failed(Some(status.as_u16()), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            self.failed(
                Some(status.as_u16()),
                format!("malformed response ({}): {}", e, body),
            )
        })
    }
}
