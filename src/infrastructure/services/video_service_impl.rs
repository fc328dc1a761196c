// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::upstream::UpstreamClient;
use crate::domain::services::generation::{
    GenerationError, ProviderStatus, Submission, VideoGenerator, VideoRequest, VideoResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    success: bool,
    request_id: Option<String>,
    video_url: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    video_url: Option<String>,
    error: Option<String>,
}

/// 视频生成服务客户端
pub struct VideoServiceImpl {
    upstream: UpstreamClient,
}

impl VideoServiceImpl {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl VideoGenerator for VideoServiceImpl {
    async fn submit(
        &self,
        request: &VideoRequest,
    ) -> Result<Submission<VideoResult>, GenerationError> {
        let response: SubmitResponse = self.upstream.post_json("generate", request).await?;

        if !response.success {
            return Err(self.upstream.failed(
                Some(200),
                response
                    .error
                    .unwrap_or_else(|| "video service reported failure".to_string()),
            ));
        }

        let result = response.video_url.map(|video_url| VideoResult { video_url });
        if response.request_id.is_none() && result.is_none() {
            return Err(self
                .upstream
                .failed(Some(200), "response carried neither request_id nor result"));
        }

        debug!(provider_task_id = ?response.request_id, "Video generation submitted");

        Ok(Submission {
            provider_task_id: response.request_id,
            result,
        })
    }

    async fn query(
        &self,
        provider_task_id: &str,
    ) -> Result<ProviderStatus<VideoResult>, GenerationError> {
        let response: StatusResponse = self
            .upstream
            .get_json(&format!("status/{}", provider_task_id))
            .await?;

        Ok(match (response.status.as_str(), response.video_url) {
            ("failed" | "error", _) => ProviderStatus::Failed(
                response
                    .error
                    .unwrap_or_else(|| "video generation failed".to_string()),
            ),
            (_, Some(video_url)) => ProviderStatus::Ready(VideoResult { video_url }),
            (_, None) => ProviderStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::UpstreamSettings;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_submit_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({ "style": "anime" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "request_id": "v1" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "failed",
                "error": "content policy"
            })))
            .mount(&server)
            .await;

        let settings = UpstreamSettings {
            base_url: server.uri(),
            api_key: None,
        };
        let client =
            VideoServiceImpl::new(UpstreamClient::new("video", &settings, Duration::from_secs(5)).unwrap());

        let submission = client
            .submit(&VideoRequest {
                prompt: "waves".to_string(),
                style: Some("anime".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(submission.provider_task_id.as_deref(), Some("v1"));

        assert_eq!(
            client.query("v1").await.unwrap(),
            ProviderStatus::Failed("content policy".to_string())
        );
    }

    #[tokio::test]
    async fn test_reported_failure_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "quota exceeded"
            })))
            .mount(&server)
            .await;

        let settings = UpstreamSettings {
            base_url: server.uri(),
            api_key: None,
        };
        let client =
            VideoServiceImpl::new(UpstreamClient::new("video", &settings, Duration::from_secs(5)).unwrap());

        let err = client
            .submit(&VideoRequest {
                prompt: "waves".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::request_failed("video", Some(200), "quota exceeded")
        );
    }
}
