// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::WebhookEvent;
use crate::domain::services::alert::{AlertError, AlertService};
use crate::utils::signature;
use async_trait::async_trait;
use std::time::Duration;

/// 告警 Webhook 投递实现
///
/// 签名为 hex(HMAC-SHA256(secret, "{timestamp}.{payload}"))
pub struct WebhookServiceImpl {
    client: reqwest::Client,
    secret: String,
}

impl WebhookServiceImpl {
    pub fn new(secret: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, secret }
    }

    fn generate_signature(&self, payload: &str, timestamp: i64) -> String {
        let message = format!("{}.{}", timestamp, payload);
        signature::sign(&self.secret, message.as_bytes())
    }
}

#[async_trait]
impl AlertService for WebhookServiceImpl {
    async fn send(&self, event: &WebhookEvent) -> Result<u16, AlertError> {
        let timestamp = chrono::Utc::now().timestamp();
        let payload = serde_json::to_string(&event.payload)
            .map_err(|e| AlertError::Transport(e.to_string()))?;
        let signature = self.generate_signature(&payload, timestamp);

        let response = self
            .client
            .post(&event.webhook_url)
            .header("Content-Type", "application/json")
            .header("X-Tunemint-Signature", signature)
            .header("X-Tunemint-Timestamp", timestamp.to_string())
            .header("X-Tunemint-Event", event.event_type.to_string())
            .header("X-Tunemint-Event-ID", event.id.to_string())
            .body(payload)
            .send()
            .await
            .map_err(|e| AlertError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AlertError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::webhook::WebhookEventType;
    use wiremock::matchers::{header, header_exists, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_signs_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Tunemint-Event", "mint.failed"))
            .and(header_exists("X-Tunemint-Signature"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = WebhookServiceImpl::new("secret".to_string());
        let event = WebhookEvent::new(
            WebhookEventType::MintFailed,
            serde_json::json!({ "video_id": "v" }),
            server.uri(),
            5,
        );

        assert_eq!(service.send(&event).await.unwrap(), 204);
    }

    #[tokio::test]
    async fn test_rejected_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let service = WebhookServiceImpl::new("secret".to_string());
        let event = WebhookEvent::new(
            WebhookEventType::MintFailed,
            serde_json::json!({}),
            server.uri(),
            5,
        );

        let err = service.send(&event).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
