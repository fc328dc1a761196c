// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::upstream::UpstreamClient;
use crate::domain::services::generation::{GenerationError, MergeRequest, MergeService};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MergeResponse {
    s3_url: Option<String>,
    error: Option<String>,
}

/// 音视频合并服务客户端
///
/// 合并是同步调用，超时单独配置
pub struct MergeServiceImpl {
    upstream: UpstreamClient,
}

impl MergeServiceImpl {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl MergeService for MergeServiceImpl {
    async fn merge(&self, request: &MergeRequest) -> Result<String, GenerationError> {
        let response: MergeResponse = self.upstream.post_json("merge", request).await?;

        match response.s3_url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(self.upstream.failed(
                Some(200),
                response
                    .error
                    .unwrap_or_else(|| "merge response missing s3_url".to_string()),
            )),
        }
    }
}
