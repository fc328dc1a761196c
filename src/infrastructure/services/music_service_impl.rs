// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::upstream::UpstreamClient;
use crate::domain::services::generation::{
    GenerationError, MusicGenerator, MusicRequest, MusicResult, ProviderStatus, Submission,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MusicData {
    audio_url: Option<String>,
    image_url: Option<String>,
}

impl MusicData {
    fn into_result(self) -> Option<MusicResult> {
        self.audio_url.map(|audio_url| MusicResult {
            audio_url,
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    success: bool,
    task_id: Option<String>,
    data: Option<MusicData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    data: Option<MusicData>,
    error: Option<String>,
}

/// 音乐生成服务客户端
pub struct MusicServiceImpl {
    upstream: UpstreamClient,
}

impl MusicServiceImpl {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl MusicGenerator for MusicServiceImpl {
    async fn submit(
        &self,
        request: &MusicRequest,
    ) -> Result<Submission<MusicResult>, GenerationError> {
        let response: SubmitResponse = self.upstream.post_json("generate", request).await?;

        if !response.success {
            return Err(self.upstream.failed(
                Some(200),
                response
                    .error
                    .unwrap_or_else(|| "music service reported failure".to_string()),
            ));
        }

        let result = response.data.and_then(MusicData::into_result);
        if response.task_id.is_none() && result.is_none() {
            return Err(self
                .upstream
                .failed(Some(200), "response carried neither task_id nor result"));
        }

        debug!(provider_task_id = ?response.task_id, "Music generation submitted");

        Ok(Submission {
            provider_task_id: response.task_id,
            result,
        })
    }

    async fn query(
        &self,
        provider_task_id: &str,
    ) -> Result<ProviderStatus<MusicResult>, GenerationError> {
        let response: StatusResponse = self
            .upstream
            .get_json(&format!("status/{}", provider_task_id))
            .await?;

        Ok(match response.status.as_str() {
            "failed" | "error" => ProviderStatus::Failed(
                response
                    .error
                    .unwrap_or_else(|| "music generation failed".to_string()),
            ),
            _ => match response.data.and_then(MusicData::into_result) {
                Some(result) => ProviderStatus::Ready(result),
                None => ProviderStatus::Pending,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::UpstreamSettings;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> MusicServiceImpl {
        let settings = UpstreamSettings {
            base_url: format!("{}/api", server.uri()),
            api_key: Some("secret".to_string()),
        };
        MusicServiceImpl::new(
            UpstreamClient::new("music", &settings, Duration::from_secs(5)).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_submit_returns_provider_task_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(serde_json::json!({
                "prompt": "sunset",
                "genre": "pop",
                "instrumental": true
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "task_id": "m1" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let submission = client
            .submit(&MusicRequest {
                prompt: "sunset".to_string(),
                genre: Some("pop".to_string()),
                instrumental: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(submission.provider_task_id.as_deref(), Some("m1"));
        assert!(submission.result.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .submit(&MusicRequest {
                prompt: "x".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::request_failed("music", Some(502), "bad gateway")
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .submit(&MusicRequest {
                prompt: "x".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let GenerationError::RequestFailed { service, status, .. } = err;
        assert_eq!(service, "music");
        assert_eq!(status, Some(200));
    }

    #[tokio::test]
    async fn test_query_maps_provider_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/status/m1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "data": { "audio_url": "a.mp3", "image_url": "i.png" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/status/m2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "running" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.query("m1").await.unwrap(),
            ProviderStatus::Ready(MusicResult {
                audio_url: "a.mp3".to_string(),
                image_url: Some("i.png".to_string()),
            })
        );
        assert_eq!(client.query("m2").await.unwrap(), ProviderStatus::Pending);
    }
}
